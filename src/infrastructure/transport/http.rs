#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_derive::Deserialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatId;
use crate::domain::models::ChatTransport;
use crate::domain::models::FetchError;
use crate::domain::models::Message;
use crate::domain::models::MessagePair;
use crate::domain::models::Sender;
use crate::domain::models::Thread;
use crate::domain::models::User;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize)]
struct CreateThreadRequest {
    user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct CreateThreadResponse {
    chat_id: Option<ChatId>,
    #[serde(default)]
    created_at: String,
    user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a ChatId,
    sender: Sender,
    text: &'a str,
}

/// Talks JSON over HTTP to the chat backend.
pub struct HttpTransport {
    url: String,
    timeout: Duration,
}

impl Default for HttpTransport {
    fn default() -> HttpTransport {
        let timeout_ms = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        return HttpTransport::new(
            &Config::get(ConfigKey::ApiURL),
            Duration::from_millis(timeout_ms),
        );
    }
}

impl HttpTransport {
    pub fn new(url: &str, timeout: Duration) -> HttpTransport {
        return HttpTransport {
            url: url.trim_end_matches('/').to_string(),
            timeout,
        };
    }

    fn client(&self) -> Result<reqwest::Client, FetchError> {
        return reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| return FetchError::Network(err.to_string()));
    }

    /// Joins `segments` onto the base URL, percent-encoding each one so an id
    /// can never reach a different endpoint. Returns the URL and its path.
    fn endpoint(&self, segments: &[&str]) -> Result<(reqwest::Url, String), FetchError> {
        let mut url = reqwest::Url::parse(&self.url)
            .map_err(|err| return FetchError::Network(format!("{}: {err}", self.url)))?;

        {
            let mut path = url.path_segments_mut().map_err(|_| {
                return FetchError::Network(format!("{} cannot be a base URL", self.url));
            })?;
            path.pop_if_empty().extend(segments);
        }

        let path = url.path().to_string();
        return Ok((url, path));
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let (url, path) = self.endpoint(segments)?;
        let res = self
            .client()?
            .get(url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await;

        return read_json(&path, res).await;
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, FetchError> {
        let (url, path) = self.endpoint(segments)?;
        let res = self.client()?.post(url).json(body).send().await;

        return read_json(&path, res).await;
    }
}

async fn read_json<T: DeserializeOwned>(
    path: &str,
    res: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, FetchError> {
    let res = match res {
        Ok(res) => res,
        Err(err) => {
            tracing::error!(error = ?err, path, "Request to chat backend failed");
            return Err(FetchError::Network(err.to_string()));
        }
    };

    if !res.status().is_success() {
        tracing::error!(
            status = res.status().as_u16(),
            path,
            "Chat backend returned an error status"
        );
        return Err(FetchError::Status {
            status: res.status().as_u16(),
            path: path.to_string(),
        });
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = ?err, path, "Failed to read chat backend response");
            return Err(FetchError::Network(err.to_string()));
        }
    };

    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => return Ok(parsed),
        Err(err) => {
            tracing::error!(error = ?err, path, body, "Unexpected chat backend response");
            return Err(FetchError::Malformed(err.to_string()));
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    #[allow(clippy::implicit_return)]
    async fn get_current_user(&self) -> Result<User, FetchError> {
        return self.get_json::<User>(&["users", "me"]).await;
    }

    #[allow(clippy::implicit_return)]
    async fn list_threads(&self, user_id: i64) -> Option<Vec<Thread>> {
        let user_id = user_id.to_string();
        return self
            .get_json::<Vec<Thread>>(&["users", user_id.as_str(), "chats", ""])
            .await
            .ok();
    }

    #[allow(clippy::implicit_return)]
    async fn create_thread(&self, user_id: i64) -> Result<Thread, FetchError> {
        let res = self
            .post_json::<_, CreateThreadResponse>(&["chats", ""], &CreateThreadRequest { user_id })
            .await?;

        let chat_id = match res.chat_id {
            Some(chat_id) if !chat_id.is_empty() => chat_id,
            _ => {
                tracing::error!("Chat backend created a thread without a chat_id");
                return Err(FetchError::Malformed(
                    "created thread is missing chat_id".to_string(),
                ));
            }
        };

        return Ok(Thread {
            chat_id,
            created_at: res.created_at,
            user_id: res.user_id.unwrap_or(user_id),
        });
    }

    #[allow(clippy::implicit_return)]
    async fn get_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, FetchError> {
        return self
            .get_json::<Vec<Message>>(&["chats", chat_id.as_str(), "messages", ""])
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(
        &self,
        chat_id: &ChatId,
        sender: Sender,
        text: &str,
    ) -> Result<MessagePair, FetchError> {
        let req = SendMessageRequest {
            chat_id,
            sender,
            text,
        };

        return self.post_json::<_, MessagePair>(&["messages", ""], &req).await;
    }
}
