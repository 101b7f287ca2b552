#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use crate::domain::models::ChatId;
use crate::domain::models::ChatTransport;
use crate::domain::models::FetchError;
use crate::domain::models::LoadTicket;
use crate::domain::models::Message;
use crate::domain::models::MessagePair;
use crate::domain::models::SendTicket;
use crate::domain::models::Sender;

/// State of one open thread: its transcript and the draft being typed.
///
/// The transcript only ever reflects what the backend confirmed. It changes
/// through exactly two entry points: `apply_load` replaces it, `apply_send`
/// appends one message pair. `revision` counts completed sends so a load that
/// started before a send finished can't wipe the pair out.
pub struct ChatSession {
    chat_id: ChatId,
    transcript: Vec<Message>,
    draft: String,
    revision: u64,
    sending: bool,
}

impl ChatSession {
    pub fn new(chat_id: ChatId) -> ChatSession {
        return ChatSession {
            chat_id,
            transcript: vec![],
            draft: "".to_string(),
            revision: 0,
            sending: false,
        };
    }

    pub fn chat_id(&self) -> &ChatId {
        return &self.chat_id;
    }

    pub fn transcript(&self) -> &[Message] {
        return &self.transcript;
    }

    pub fn draft(&self) -> &str {
        return &self.draft;
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn is_sending(&self) -> bool {
        return self.sending;
    }

    /// Points the session at another thread. Switching threads drops the
    /// transcript and draft, and invalidates every outstanding ticket.
    pub fn open(&mut self, chat_id: ChatId) -> LoadTicket {
        if chat_id != self.chat_id {
            self.chat_id = chat_id;
            self.transcript = vec![];
            self.draft = "".to_string();
            self.sending = false;
            self.revision += 1;
        }

        return self.begin_load();
    }

    pub fn begin_load(&self) -> LoadTicket {
        return LoadTicket {
            chat_id: self.chat_id.clone(),
            revision: self.revision,
        };
    }

    /// Returns whether the transcript changed.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        res: Result<Vec<Message>, FetchError>,
    ) -> bool {
        if ticket.chat_id != self.chat_id {
            tracing::debug!(chat_id = %ticket.chat_id, "Dropping transcript of a previous thread");
            return false;
        }

        let loaded = match res {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::error!(chat_id = %self.chat_id, error = ?err, "Failed to load messages");
                return false;
            }
        };

        if ticket.revision == self.revision {
            self.transcript = loaded;
            return true;
        }

        // A send completed while loading. Keep the server's order and
        // re-append whatever confirmed messages the load didn't include.
        let mut merged = loaded;
        for message in self.transcript.drain(..) {
            if !merged.iter().any(|loaded| return loaded.id == message.id) {
                merged.push(message);
            }
        }
        self.transcript = merged;

        return true;
    }

    /// Starts a send of the current draft. Returns `None` without side
    /// effects when the draft is blank or a send is already in flight.
    pub fn begin_send(&mut self) -> Option<SendTicket> {
        if self.sending || self.draft.trim().is_empty() {
            return None;
        }

        self.sending = true;

        return Some(SendTicket {
            chat_id: self.chat_id.clone(),
            text: self.draft.to_string(),
        });
    }

    /// Returns whether the transcript changed.
    pub fn apply_send(&mut self, ticket: SendTicket, res: Result<MessagePair, FetchError>) -> bool {
        if ticket.chat_id != self.chat_id {
            tracing::debug!(chat_id = %ticket.chat_id, "Dropping reply for a previous thread");
            return false;
        }

        self.sending = false;

        match res {
            Ok(pair) => {
                self.transcript.extend(pair.into_messages());
                self.revision += 1;
                self.draft = "".to_string();
                return true;
            }
            Err(err) => {
                tracing::error!(chat_id = %self.chat_id, error = ?err, "Failed to send message");
                return false;
            }
        }
    }

    pub async fn load(&mut self, transport: &dyn ChatTransport) -> bool {
        let ticket = self.begin_load();
        let res = transport.get_messages(&ticket.chat_id).await;

        return self.apply_load(ticket, res);
    }

    /// Returns whether a message pair was appended.
    pub async fn send(&mut self, transport: &dyn ChatTransport) -> bool {
        let ticket = match self.begin_send() {
            Some(ticket) => ticket,
            None => return false,
        };

        let res = transport
            .send_message(&ticket.chat_id, Sender::User, &ticket.text)
            .await;

        return self.apply_send(ticket, res);
    }
}
