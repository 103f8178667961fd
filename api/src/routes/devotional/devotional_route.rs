//! POST /gloo-devotional: generates a daily devotional.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    pipeline::{self, FeatureResponse},
    routes::devotional::devotional_request::DevotionalRequest,
};

#[instrument(name = "gloo_devotional_route", skip_all)]
pub async fn devotional_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DevotionalRequest>, JsonRejection>,
) -> AppResult<FeatureResponse> {
    let Json(body) = payload?;

    info!(
        topic = body.topic.as_deref().unwrap_or(""),
        verse_reference = body.verse_reference.as_deref().unwrap_or(""),
        "generating devotional"
    );

    pipeline::run(&state.gloo, body.into()).await
}
