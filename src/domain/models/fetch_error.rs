use thiserror::Error;

/// Failure of a single request to the chat backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never reached the backend, or no response came back.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Chat backend returned status {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body could not be used, e.g. `chat_id` is absent after
    /// creating a thread.
    #[error("Malformed response: {0}")]
    Malformed(String),
}
