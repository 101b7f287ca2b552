#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ChatId;
use super::Sender;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(alias = "message_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
}

/// The two messages produced by one send: the stored user message and the
/// bot's reply to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePair {
    pub user_message: Message,
    pub bot_message: Message,
}

impl MessagePair {
    pub fn into_messages(self) -> [Message; 2] {
        return [self.user_message, self.bot_message];
    }
}

impl Message {
    /// Splits the text into display lines no wider than `line_max_width`,
    /// breaking on spaces. Single words longer than the width are kept whole.
    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.replace('\t', "  ").split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_words: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if !current_words.is_empty() && word_len + char_count > line_max_width {
                    lines.push(current_words.join(" ").trim_end().to_string());
                    current_words = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_words.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_words.is_empty() {
                lines.push(current_words.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
