use std::str::FromStr;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumString;

/// Author of a message. The backend is inconsistent with casing (`"user"`,
/// `"BOT"`), so parsing ignores case and serializing is always lowercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString, strum::Display)]
#[serde(try_from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn title(&self) -> &'static str {
        match self {
            Sender::User => return "You",
            Sender::Bot => return "Bot",
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Sender, Self::Error> {
        return Sender::from_str(&value);
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> String {
        return sender.to_string();
    }
}
