//! Maps upstream envelopes to the JSON contract the frontend reads.
//!
//! Absent upstream fields become explicit `null`s (lists become `[]`).
//! A missing text body is logged, not treated as an error.

use gloo_ai_service::services::{
    completion_service::CompletionEnvelope, message_service::MessageEnvelope,
};
use serde::Serialize;
use tracing::warn;

use crate::pipeline::feature::{Feature, JournalAction};

/// Response body for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub message: Option<String>,
    pub suggestions: Vec<String>,
    pub sources: Vec<serde_json::Value>,
}

/// Response body for the devotional endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevotionalResponse {
    pub devotional: Option<String>,
}

/// Response body for the journal endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalResponse {
    pub result: Option<String>,
    pub action: JournalAction,
}

pub fn chat(env: MessageEnvelope) -> ChatResponse {
    if env.message.is_none() {
        warn!(feature = %Feature::Chat, "upstream envelope has no `message`");
    }
    ChatResponse {
        chat_id: env.chat_id,
        message_id: env.message_id,
        message: env.message,
        suggestions: env.suggestions.unwrap_or_default(),
        sources: env.sources.unwrap_or_default(),
    }
}

pub fn devotional(env: CompletionEnvelope) -> DevotionalResponse {
    DevotionalResponse {
        devotional: completion_text(Feature::Devotional, env),
    }
}

pub fn journal(action: JournalAction, env: CompletionEnvelope) -> JournalResponse {
    JournalResponse {
        result: completion_text(Feature::Journal, env),
        action,
    }
}

fn completion_text(feature: Feature, env: CompletionEnvelope) -> Option<String> {
    let text = env.first_content();
    if text.is_none() {
        warn!(%feature, "upstream envelope has no `choices[0].message.content`");
    }
    text
}
