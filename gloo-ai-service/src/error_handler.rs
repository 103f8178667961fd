//! Unified error handling for `gloo-ai-service`.
//!
//! This module exposes a single top-level error type [`GlooError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`AuthError`], [`UpstreamError`]). Small helpers for reading/validating
//! environment variables are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[Gloo AI Service]` to simplify attribution in logs.
//! None of them ever contain credential material.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, GlooError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `gloo-ai-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GlooError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token exchange errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Errors from the message / chat-completion endpoints.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[Gloo AI Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like timeouts).
    #[error("[Gloo AI Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL or flag).
    #[error("[Gloo AI Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[Gloo AI Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Auth errors                                                               */
/* ------------------------------------------------------------------------- */

/// Errors raised while exchanging client credentials for a bearer token.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AuthError {
    /// Client id or secret is absent for this request.
    #[error("[Gloo AI Service] Gloo credentials not configured")]
    NotConfigured,

    /// Token endpoint answered with a non-successful status.
    #[error("[Gloo AI Service] token endpoint rejected credentials: {0}")]
    Rejected(HttpError),

    /// Token response could not be decoded.
    #[error("[Gloo AI Service] token decode error: {0}")]
    Decode(String),
}

/* ------------------------------------------------------------------------- */
/* Upstream errors                                                           */
/* ------------------------------------------------------------------------- */

/// Errors raised by the message and chat-completion calls.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream returned a non-successful HTTP status.
    #[error("[Gloo AI Service] {0}")]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[Gloo AI Service] decode error: {0}")]
    Decode(String),
}

/// Status, URL and a short body snippet of a failed HTTP exchange.
///
/// Kept for server-side diagnostics only.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Upper bound for response snippets kept in errors and logs.
const SNIPPET_MAX_CHARS: usize = 300;

/// Trims a response body to a single-line snippet suitable for logs.
pub fn make_snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_MAX_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(SNIPPET_MAX_CHARS).collect();
    out.push('…');
    out
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match env_opt(name) {
        Some(v) => v.parse::<u64>().map(Some).map_err(|_| {
            GlooError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/// Parses a boolean flag from env, falling back to `default` when unset.
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive).
pub fn env_flag(name: &'static str, default: bool) -> Result<bool> {
    match env_opt(name) {
        Some(v) => parse_flag(&v).ok_or_else(|| {
            ConfigError::InvalidFormat {
                var: name,
                reason: "expected a boolean flag",
            }
            .into()
        }),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start
/// with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}
