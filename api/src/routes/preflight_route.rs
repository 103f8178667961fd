use axum::http::StatusCode;

/// `OPTIONS` on any proxy endpoint. CORS headers are added by the router layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
