use super::ChatId;

/// Issued when a transcript load starts. The result is only applied as a
/// wholesale replacement if the session still shows `chat_id` at the same
/// `revision`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub chat_id: ChatId,
    pub revision: u64,
}

/// Issued when a send starts, holding the captured draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendTicket {
    pub chat_id: ChatId,
    pub text: String,
}
