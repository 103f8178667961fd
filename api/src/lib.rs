use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
pub mod pipeline;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, http::cors::cors_layer},
    error_handler::AppError,
    routes::{
        chat::chat_route::chat_route, devotional::devotional_route::devotional_route,
        health_route::health, journal::journal_route::journal_route,
        preflight_route::preflight,
    },
};

const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

/// The three proxy endpoints, each answering `POST` and `OPTIONS`.
fn function_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gloo-chat", post(chat_route).options(preflight))
        .route("/gloo-devotional", post(devotional_route).options(preflight))
        .route("/gloo-journal", post(journal_route).options(preflight))
}

/// Builds the full application router.
///
/// Endpoints are mounted at the root and under `/functions/v1`, the path
/// layout the hosted functions use.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(function_routes())
        .nest("/functions/v1", function_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %host_url, "faith companion API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
