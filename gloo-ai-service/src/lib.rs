//! Client for the Gloo AI platform: client-credentials token exchange,
//! conversational messages and chat completions.

pub mod auth;
pub mod config;
pub mod error_handler;
pub mod gloo_client;
pub mod services;
pub mod telemetry;

pub use config::{
    credentials::{CredentialSource, TokenCredential},
    gloo_config::GlooConfig,
};
pub use error_handler::{AuthError, ConfigError, GlooError, UpstreamError};
pub use gloo_client::GlooClient;
