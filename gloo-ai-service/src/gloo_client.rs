//! Facade over the token exchange and the two upstream calls.
//!
//! Construct once, wrap in `Arc`, share between handlers. Each call resolves
//! credentials, obtains a bearer token and issues exactly one upstream request.

use std::time::Duration;

use tracing::info;

use crate::{
    auth::{CredentialExchanger, TokenCache},
    config::{credentials::CredentialSource, gloo_config::GlooConfig},
    error_handler::{GlooError, Result},
    services::{
        completion_service::{CompletionEnvelope, CompletionService},
        message_service::{MessageEnvelope, MessageRequest, MessageService},
    },
};

#[derive(Debug)]
pub struct GlooClient {
    credentials: CredentialSource,
    exchanger: CredentialExchanger,
    messages: MessageService,
    completions: CompletionService,
    cache: Option<TokenCache>,
}

impl GlooClient {
    /// Creates a client from a validated config.
    ///
    /// # Errors
    /// - [`GlooError::Config`] if the config is invalid
    /// - [`GlooError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: GlooConfig, credentials: CredentialSource) -> Result<Self> {
        cfg.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(GlooError::from)?;

        info!(
            token_url = %cfg.token_url,
            api_base = %cfg.api_base,
            model = %cfg.model,
            timeout_secs = ?cfg.timeout_secs,
            token_cache = cfg.token_cache,
            "GlooClient initialized"
        );

        Ok(Self {
            credentials,
            exchanger: CredentialExchanger::new(client.clone(), cfg.token_url.clone()),
            messages: MessageService::new(client.clone(), cfg.message_url()),
            completions: CompletionService::new(client, cfg.completions_url(), cfg.model.clone()),
            cache: cfg.token_cache.then(TokenCache::new),
        })
    }

    /// Resolves credentials and returns a bearer token for one upstream call.
    pub async fn bearer_token(&self) -> Result<String> {
        let cred = self.credentials.resolve()?;
        match &self.cache {
            Some(cache) => cache.get_or_fetch(&self.exchanger, &cred).await,
            None => Ok(self.exchanger.access_token(&cred).await?.value),
        }
    }

    /// Authenticates, then sends one chat turn.
    pub async fn send_message(&self, body: &MessageRequest) -> Result<MessageEnvelope> {
        let token = self.bearer_token().await?;
        self.messages.send(&token, body).await
    }

    /// Authenticates, then runs one chat completion.
    pub async fn complete(&self, system: &str, user: &str) -> Result<CompletionEnvelope> {
        let token = self.bearer_token().await?;
        self.completions.complete(&token, system, user).await
    }

    pub fn model(&self) -> &str {
        self.completions.model()
    }
}
