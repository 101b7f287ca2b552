#[cfg(test)]
#[path = "thread_creation_test.rs"]
mod tests;

use crate::domain::models::ChatTransport;
use crate::domain::models::FetchError;
use crate::domain::models::Route;

pub struct ThreadCreation {}

impl ThreadCreation {
    /// Creates a thread for `user_id` and returns the route to open it. On any
    /// failure nothing should be navigated to; the user retries by hand.
    pub async fn create_and_open(
        transport: &dyn ChatTransport,
        user_id: i64,
    ) -> Result<Route, FetchError> {
        let thread = match transport.create_thread(user_id).await {
            Ok(thread) => thread,
            Err(err) => {
                tracing::error!(user_id, error = ?err, "Failed to start a new chat");
                return Err(err);
            }
        };

        if thread.chat_id.is_empty() {
            tracing::error!(user_id, "New chat has no usable chat_id");
            return Err(FetchError::Malformed(
                "created thread has an empty chat_id".to_string(),
            ));
        }

        return Ok(Route::ChatSession(thread.chat_id));
    }
}
