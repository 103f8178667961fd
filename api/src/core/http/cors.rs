use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Request headers the browser client (Supabase `functions.invoke`) sends.
const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// Permissive CORS: any origin, the proxy methods, the client's headers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS)
}
