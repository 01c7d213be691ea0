//! Outbound transport for the chat endpoint.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ExchangeError;
use crate::protocol::{ChatRequest, ChatResponse};

/// Delivers one message and returns the endpoint's reply text.
///
/// Each call settles exactly once. Implementations must not retry.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ExchangeError>;
}

/// `POST {endpoint}/chat` with a JSON body, via reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    chat_url: String,
}

impl HttpTransport {
    pub fn new(chat_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            chat_url: chat_url.into(),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, ExchangeError> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        debug!(url = %self.chat_url, bytes = message.len(), "posting chat message");

        let resp = self.client.post(&self.chat_url).json(&body).send().await?;

        // The status is not inspected: any body carrying a string `reply` is
        // shown, anything else is a decode failure.
        let status = resp.status();
        if !status.is_success() {
            debug!(%status, "chat endpoint returned a non-success status");
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.reply)
    }
}
