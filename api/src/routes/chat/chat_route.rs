//! POST /gloo-chat: one conversational turn against the Gloo message API.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    pipeline::{self, FeatureResponse},
    routes::chat::chat_request::ChatRequest,
};

/// Handler: POST /gloo-chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/gloo-chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"What does the Bible say about rest?"}'
/// ```
#[instrument(name = "gloo_chat_route", skip_all)]
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<FeatureResponse> {
    let Json(body) = payload?;

    info!(
        query_len = body.query.as_deref().map_or(0, str::len),
        has_chat_id = body.chat_id.is_some(),
        "chat request"
    );

    pipeline::run(&state.gloo, body.into()).await
}
