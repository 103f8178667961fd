//! Gloo platform configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GLOO_TOKEN_URL`    = OAuth2 token endpoint (default: Gloo production)
//! - `GLOO_API_BASE`     = base URL for `/ai/v1/*` calls (default: Gloo production)
//! - `GLOO_MODEL`        = model pinned for chat completions
//! - `GLOO_TIMEOUT_SECS` = optional per-request timeout; transport default when unset
//! - `GLOO_TOKEN_CACHE`  = reuse tokens across requests until they expire (default: off)
//!
//! Client id and secret are not part of this struct: they are resolved per
//! request through [`CredentialSource`](crate::config::credentials::CredentialSource).

use crate::error_handler::{
    ConfigError, Result, env_flag, env_opt, env_opt_u64, validate_http_endpoint,
};

pub const DEFAULT_TOKEN_URL: &str = "https://platform.ai.gloo.com/oauth2/token";
pub const DEFAULT_API_BASE: &str = "https://platform.ai.gloo.com";
pub const DEFAULT_MODEL: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Endpoints and call options for the Gloo platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlooConfig {
    /// OAuth2 client-credentials token endpoint.
    pub token_url: String,
    /// Base URL; message and completion paths are appended to it.
    pub api_base: String,
    /// Model identifier sent with every chat completion.
    pub model: String,
    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
    /// Keep tokens between requests until they expire.
    pub token_cache: bool,
}

impl Default for GlooConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            token_cache: false,
        }
    }
}

impl GlooConfig {
    /// Builds the config from env, falling back to production defaults.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] for a non-http URL or a malformed flag
    /// - [`ConfigError::InvalidNumber`] for a malformed timeout
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let cfg = Self {
            token_url: env_opt("GLOO_TOKEN_URL").unwrap_or(defaults.token_url),
            api_base: env_opt("GLOO_API_BASE").unwrap_or(defaults.api_base),
            model: env_opt("GLOO_MODEL").unwrap_or(defaults.model),
            timeout_secs: env_opt_u64("GLOO_TIMEOUT_SECS")?,
            token_cache: env_flag("GLOO_TOKEN_CACHE", false)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks URL schemes and the model name.
    pub fn validate(&self) -> Result<()> {
        validate_http_endpoint("GLOO_TOKEN_URL", &self.token_url)?;
        validate_http_endpoint("GLOO_API_BASE", &self.api_base)?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        Ok(())
    }

    /// `POST` target for the conversational message API.
    pub fn message_url(&self) -> String {
        format!("{}/ai/v1/message", self.api_base.trim_end_matches('/'))
    }

    /// `POST` target for the chat-completions API.
    pub fn completions_url(&self) -> String {
        format!("{}/ai/v1/chat/completions", self.api_base.trim_end_matches('/'))
    }
}
