use gloo_ai_service::{CredentialSource, GlooClient, GlooConfig};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Debug)]
pub struct AppState {
    /// Gloo platform client; credentials are resolved per request.
    pub gloo: GlooClient,
}

impl AppState {
    pub fn new(gloo: GlooClient) -> Self {
        Self { gloo }
    }

    /// Load shared state from environment variables.
    ///
    /// Missing client id/secret is not a startup error: requests fail
    /// individually until they are configured.
    pub fn from_env() -> Result<Self, AppError> {
        let cfg = GlooConfig::from_env()?;
        let gloo = GlooClient::new(cfg, CredentialSource::Env)?;
        Ok(Self::new(gloo))
    }
}
