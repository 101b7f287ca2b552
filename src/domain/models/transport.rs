use std::sync::Arc;

use async_trait::async_trait;

use super::ChatId;
use super::FetchError;
use super::Message;
use super::MessagePair;
use super::Sender;
use super::Thread;
use super::User;

pub type TransportArc = Arc<dyn ChatTransport>;

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Resolves the user the client acts on behalf of.
    async fn get_current_user(&self) -> Result<User, FetchError>;

    /// Lists the user's threads. Failures are logged and reported as `None`;
    /// callers display that exactly like an empty list.
    async fn list_threads(&self, user_id: i64) -> Option<Vec<Thread>>;

    /// Creates a new thread. A response without a `chat_id` is an error.
    async fn create_thread(&self, user_id: i64) -> Result<Thread, FetchError>;

    /// Fetches the full transcript of a thread, bypassing any caches.
    async fn get_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, FetchError>;

    /// Stores a message and returns it alongside the bot's reply, produced in
    /// the same round trip.
    async fn send_message(
        &self,
        chat_id: &ChatId,
        sender: Sender,
        text: &str,
    ) -> Result<MessagePair, FetchError>;
}
