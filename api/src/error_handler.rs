use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gloo_ai_service::{AuthError, GlooError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::pipeline::{feature::Feature, prompt::ValidationError};

/// Public application error type.
///
/// Every variant renders as `{"error": "<message>"}`. Upstream status codes
/// and bodies stay in the server logs.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("startup failed: {0}")]
    Startup(#[from] GlooError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure while talking to the Gloo platform on behalf of `feature`.
    #[error("{feature} request failed: {source}")]
    Upstream {
        feature: Feature,
        #[source]
        source: GlooError,
    },
}

impl AppError {
    pub fn upstream(feature: Feature, source: GlooError) -> Self {
        AppError::Upstream { feature, source }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Startup(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to the browser.
    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Validation(v) => v.to_string(),
            AppError::Upstream { feature, source } => match source {
                GlooError::Auth(AuthError::NotConfigured) => {
                    "Gloo credentials not configured".to_string()
                }
                GlooError::Auth(_) => "Failed to authenticate with Gloo AI".to_string(),
                _ => feature.failure_message().to_string(),
            },
            AppError::Startup(_) | AppError::Bind(_) | AppError::Server(_) => "Internal server error".to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        tracing::debug!(error = %err, "rejected request body");
        AppError::BadRequest("Invalid JSON body".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_ai_service::{UpstreamError, error_handler::HttpError};

    fn upstream_500(feature: Feature) -> AppError {
        AppError::upstream(
            feature,
            GlooError::Upstream(UpstreamError::HttpStatus(HttpError {
                status: StatusCode::BAD_GATEWAY,
                url: "http://gloo/ai/v1/message".into(),
                snippet: "secret upstream detail".into(),
            })),
        )
    }

    #[test]
    fn upstream_failure_uses_feature_message() {
        let err = upstream_500(Feature::Devotional);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Failed to generate devotional");
    }

    #[test]
    fn upstream_detail_is_not_exposed() {
        let err = upstream_500(Feature::Chat);
        assert!(!err.client_message().contains("secret upstream detail"));
    }

    #[test]
    fn auth_failures_have_generic_messages() {
        let missing = AppError::upstream(Feature::Journal, AuthError::NotConfigured.into());
        assert_eq!(missing.client_message(), "Gloo credentials not configured");

        let rejected = AppError::upstream(
            Feature::Journal,
            AuthError::Decode("bad json".into()).into(),
        );
        assert_eq!(rejected.client_message(), "Failed to authenticate with Gloo AI");
    }

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::from(ValidationError::MissingQuery);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Query is required");
    }
}
