//! Single `compose → authenticate → call upstream → normalize` pipeline
//! shared by the three proxy endpoints.

pub mod feature;
pub mod normalize;
pub mod prompt;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use gloo_ai_service::GlooClient;
use tracing::info;

use crate::{
    error_handler::{AppError, AppResult},
    pipeline::{
        feature::Feature,
        normalize::{ChatResponse, DevotionalResponse, JournalResponse},
        prompt::ComposedRequest,
    },
};

/// Raw user input, one variant per endpoint. Checked by [`prompt::compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureRequest {
    Chat {
        query: Option<String>,
        chat_id: Option<String>,
    },
    Devotional {
        topic: Option<String>,
        verse_reference: Option<String>,
    },
    Journal {
        action: Option<String>,
        journal_entry: Option<String>,
        prompt: Option<String>,
    },
}

impl FeatureRequest {
    pub fn feature(&self) -> Feature {
        match self {
            FeatureRequest::Chat { .. } => Feature::Chat,
            FeatureRequest::Devotional { .. } => Feature::Devotional,
            FeatureRequest::Journal { .. } => Feature::Journal,
        }
    }
}

/// Normalized body for whichever endpoint ran.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureResponse {
    Chat(ChatResponse),
    Devotional(DevotionalResponse),
    Journal(JournalResponse),
}

impl IntoResponse for FeatureResponse {
    fn into_response(self) -> Response {
        match self {
            FeatureResponse::Chat(body) => Json(body).into_response(),
            FeatureResponse::Devotional(body) => Json(body).into_response(),
            FeatureResponse::Journal(body) => Json(body).into_response(),
        }
    }
}

/// Runs one request end to end.
///
/// Validation happens first; a rejected request never resolves credentials
/// or opens a connection. Otherwise one token exchange (skipped on a cache hit) and one
/// upstream call are made.
pub async fn run(gloo: &GlooClient, req: FeatureRequest) -> AppResult<FeatureResponse> {
    let feature = req.feature();
    let composed = prompt::compose(&req)?;

    let response = match composed {
        ComposedRequest::Chat(body) => {
            let env = gloo
                .send_message(&body)
                .await
                .map_err(|e| AppError::upstream(feature, e))?;
            FeatureResponse::Chat(normalize::chat(env))
        }
        ComposedRequest::Devotional(prompt) => {
            let env = gloo
                .complete(&prompt.system, &prompt.user)
                .await
                .map_err(|e| AppError::upstream(feature, e))?;
            FeatureResponse::Devotional(normalize::devotional(env))
        }
        ComposedRequest::Journal { action, prompt } => {
            let env = gloo
                .complete(&prompt.system, &prompt.user)
                .await
                .map_err(|e| AppError::upstream(feature, e))?;
            FeatureResponse::Journal(normalize::journal(action, env))
        }
    };

    info!(%feature, "request completed");
    Ok(response)
}
