//! Gloo conversational message API (`POST {api_base}/ai/v1/message`).
//!
//! The query is forwarded verbatim with fixed generation parameters. The
//! platform keeps conversation context against `chat_id`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::error_handler::{GlooError, HttpError, UpstreamError, make_snippet};

pub const CHARACTER_LIMIT: u32 = 1000;
pub const SOURCES_LIMIT: u32 = 5;

/// Request body for the message endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRequest {
    pub query: String,
    pub character_limit: u32,
    pub sources_limit: u32,
    pub stream: bool,
    pub publishers: Vec<String>,
    pub enable_suggestions: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

impl MessageRequest {
    /// Builds the fixed-parameter request for one chat turn.
    pub fn for_query(query: impl Into<String>, chat_id: Option<String>) -> Self {
        Self {
            query: query.into(),
            character_limit: CHARACTER_LIMIT,
            sources_limit: SOURCES_LIMIT,
            stream: false,
            publishers: Vec::new(),
            enable_suggestions: 1,
            chat_id,
        }
    }
}

/// Response envelope of the message endpoint. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageEnvelope {
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub message: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub sources: Option<Vec<serde_json::Value>>,
}

/// Sends one message per call.
#[derive(Debug, Clone)]
pub struct MessageService {
    client: reqwest::Client,
    url: String,
}

impl MessageService {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Sends one message with the given bearer token.
    ///
    /// # Errors
    /// - [`UpstreamError::HttpStatus`] for non-2xx responses
    /// - [`UpstreamError::Decode`] if the body is not the expected JSON
    /// - [`GlooError::HttpTransport`] for client/network failures
    #[instrument(name = "gloo_message", skip_all, fields(has_chat_id = body.chat_id.is_some()))]
    pub async fn send(&self, token: &str, body: &MessageRequest) -> Result<MessageEnvelope, GlooError> {
        let started = Instant::now();
        debug!(
            query_len = body.query.len(),
            has_chat_id = body.chat_id.is_some(),
            "POST {}", self.url
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Gloo /ai/v1/message returned non-success status"
            );

            return Err(UpstreamError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        let out: MessageEnvelope = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode /ai/v1/message response"
            );
            UpstreamError::Decode(format!("serde error: {e}; expected message envelope"))
        })?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            suggestions = out.suggestions.as_ref().map_or(0, Vec::len),
            "message completed"
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_fixed_parameters() {
        let body = serde_json::to_value(MessageRequest::for_query("Who was Ruth?", None)).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "Who was Ruth?",
                "character_limit": 1000,
                "sources_limit": 5,
                "stream": false,
                "publishers": [],
                "enable_suggestions": 1
            })
        );
    }

    #[test]
    fn chat_id_is_sent_only_when_present() {
        let body =
            serde_json::to_value(MessageRequest::for_query("more", Some("c-1".into()))).unwrap();
        assert_eq!(body["chat_id"], "c-1");
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let env: MessageEnvelope = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert_eq!(env.message.as_deref(), Some("hi"));
        assert!(env.chat_id.is_none());
        assert!(env.suggestions.is_none());
    }
}
