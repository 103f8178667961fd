//! Gloo chat-completions API (`POST {api_base}/ai/v1/chat/completions`).
//!
//! Non-streaming. Every request is a `[system, user]` pair and carries the
//! configured model identifier.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::error_handler::{GlooError, HttpError, UpstreamError, make_snippet};

/// Minimal request body for `/ai/v1/chat/completions`.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/ai/v1/chat/completions`.
///
/// Every level may be absent or `null`; none of that is a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionEnvelope {
    #[serde(default)]
    pub choices: Option<Vec<Option<CompletionChoice>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionEnvelope {
    /// Text of the first choice, if the upstream sent one.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .and_then(|choices| choices.into_iter().next())
            .flatten()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }

    fn choice_count(&self) -> usize {
        self.choices.as_ref().map_or(0, Vec::len)
    }
}

/// Runs chat completions against one pinned model.
#[derive(Debug, Clone)]
pub struct CompletionService {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl CompletionService {
    pub fn new(client: reqwest::Client, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Performs a **non-streaming** completion with a system and a user prompt.
    ///
    /// # Errors
    /// - [`UpstreamError::HttpStatus`] for non-2xx responses
    /// - [`UpstreamError::Decode`] if the JSON cannot be parsed
    /// - [`GlooError::HttpTransport`] for client/network failures
    #[instrument(name = "gloo_completion", skip_all, fields(model = %self.model))]
    pub async fn complete(
        &self,
        token: &str,
        system: &str,
        user: &str,
    ) -> Result<CompletionEnvelope, GlooError> {
        let started = Instant::now();
        let body = CompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        debug!(
            model = %self.model,
            prompt_len = user.len(),
            "POST {}", self.url
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&body)
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
                model = %self.model,
                latency_ms = started.elapsed().as_millis(),
                "Gloo /ai/v1/chat/completions returned non-success status"
            );

            return Err(UpstreamError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        let out: CompletionEnvelope = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                model = %self.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode /ai/v1/chat/completions response"
            );
            UpstreamError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        info!(
            model = %self.model,
            choices = out.choice_count(),
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );

        Ok(out)
    }
}
