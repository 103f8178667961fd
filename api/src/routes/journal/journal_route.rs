//! POST /gloo-journal: reflection, journaling prompt or prayer.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    pipeline::{self, FeatureResponse},
    routes::journal::journal_request::JournalRequest,
};

#[instrument(name = "gloo_journal_route", skip_all)]
pub async fn journal_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JournalRequest>, JsonRejection>,
) -> AppResult<FeatureResponse> {
    let Json(body) = payload?;

    // Entry text is private; only its presence is logged.
    info!(
        action = ?body.action,
        has_entry = body.journal_entry.as_deref().is_some_and(|e| !e.trim().is_empty()),
        "journal request"
    );

    pipeline::run(&state.gloo, body.into()).await
}
