#[cfg(test)]
#[path = "thread_test.rs"]
mod tests;

use std::fmt;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Deserializer;
use serde::Serializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Identifier of a chat thread. The backend emits integers, but the client
/// never does arithmetic on it, so it is carried around as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChatId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChatId {
    Number(i64),
    Text(String),
}

impl ChatId {
    pub fn new(id: &str) -> ChatId {
        return ChatId(id.trim().to_string());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    pub fn is_empty(&self) -> bool {
        return self.0.is_empty();
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

impl serde::Serialize for ChatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Ok(number) = self.0.parse::<i64>() {
            return serializer.serialize_i64(number);
        }

        return serializer.serialize_str(&self.0);
    }
}

impl<'de> serde::Deserialize<'de> for ChatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ChatId, D::Error> {
        let raw = <RawChatId as serde::Deserialize>::deserialize(deserializer)?;
        match raw {
            RawChatId::Number(number) => return Ok(ChatId(number.to_string())),
            RawChatId::Text(text) => return Ok(ChatId::new(&text)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub chat_id: ChatId,
    pub created_at: String,
    pub user_id: i64,
}

impl Thread {
    /// Calendar day the thread was started on. Falls back to the raw value
    /// when the backend sends something that isn't a date.
    pub fn created_date(&self) -> String {
        let raw = self.created_at.trim();
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
                return datetime.date().format("%Y-%m-%d").to_string();
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }

        return raw.to_string();
    }

    pub fn summary(&self) -> String {
        return format!("Chat {} created {}", self.chat_id, self.created_date());
    }
}
