//! OAuth2 client-credentials exchange against the Gloo token endpoint.
//!
//! `POST {token_url}` with HTTP Basic auth (`base64(id:secret)`) and the form
//! body `grant_type=client_credentials&scope=api/access`. One network call
//! per invocation, no retry.
//!
//! [`TokenCache`] is opt-in: by default every request exchanges credentials
//! again and the token is dropped when the request ends.

use std::{
    collections::HashMap,
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::{
    config::credentials::TokenCredential,
    error_handler::{AuthError, GlooError, HttpError, make_snippet},
};

const TOKEN_FORM_BODY: &str = "grant_type=client_credentials&scope=api/access";

/// Bearer token returned by the token endpoint.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    #[serde(rename = "access_token")]
    pub value: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Builds the `Authorization: Basic ...` header value for a credential pair.
pub fn basic_auth_value(cred: &TokenCredential) -> String {
    let raw = format!("{}:{}", cred.client_id, cred.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Exchanges a client id/secret pair for a bearer token.
#[derive(Debug, Clone)]
pub struct CredentialExchanger {
    client: reqwest::Client,
    token_url: String,
}

impl CredentialExchanger {
    pub fn new(client: reqwest::Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }

    /// Performs one token exchange.
    ///
    /// # Errors
    /// - [`AuthError::Rejected`] for a non-2xx answer (status/body only logged)
    /// - [`AuthError::Decode`] if the JSON lacks `access_token`
    /// - [`GlooError::HttpTransport`] for network failures
    #[instrument(name = "gloo_token", skip_all, fields(client_id = %cred.client_id))]
    pub async fn access_token(&self, cred: &TokenCredential) -> Result<AccessToken, GlooError> {
        let started = Instant::now();
        debug!(client_id = %cred.client_id, "POST {}", self.token_url);

        let resp = self
            .client
            .post(&self.token_url)
            .header(header::AUTHORIZATION, basic_auth_value(cred))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(TOKEN_FORM_BODY)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.token_url.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "token endpoint returned non-success status"
            );

            return Err(AuthError::Rejected(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        let token: AccessToken = resp.json().await.map_err(|e| {
            error!(error = %e, "failed to decode token response");
            AuthError::Decode(format!("serde error: {e}; expected `access_token`"))
        })?;

        debug!(
            expires_in = ?token.expires_in,
            latency_ms = started.elapsed().as_millis(),
            "access token acquired"
        );

        Ok(token)
    }
}

/* ===========================================================================
Token cache
======================================================================== */

/// Seconds shaved off `expires_in` so a cached token never expires mid-call.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

type Slot = Arc<Mutex<Option<CachedToken>>>;

/// Shared token cache keyed by credential pair.
///
/// Each pair owns a slot. The outer map lock is only held to look the slot
/// up; the slot lock is held across the exchange, so concurrent requests for
/// one pair share a single fetch while other pairs proceed independently.
#[derive(Debug, Default)]
pub struct TokenCache {
    slots: Mutex<HashMap<TokenCredential, Slot>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, cred: &TokenCredential) -> Slot {
        let mut slots = self.slots.lock().await;
        slots.entry(cred.clone()).or_default().clone()
    }

    /// Returns a live cached token or fetches and stores a new one.
    ///
    /// Tokens without `expires_in`, or with a lifetime shorter than the
    /// safety margin, are returned but never stored.
    pub async fn get_or_fetch(
        &self,
        exchanger: &CredentialExchanger,
        cred: &TokenCredential,
    ) -> Result<String, GlooError> {
        let slot = self.slot(cred).await;
        let mut cached = slot.lock().await;

        if let Some(hit) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            debug!(client_id = %cred.client_id, "token cache hit");
            return Ok(hit.value.clone());
        }
        *cached = None;

        let token = exchanger.access_token(cred).await?;
        let lifetime = token
            .expires_in
            .map(Duration::from_secs)
            .and_then(|d| d.checked_sub(EXPIRY_MARGIN))
            .filter(|d| !d.is_zero());

        if let Some(lifetime) = lifetime {
            info!(
                client_id = %cred.client_id,
                ttl_secs = lifetime.as_secs(),
                "token cached"
            );
            *cached = Some(CachedToken {
                value: token.value.clone(),
                expires_at: Instant::now() + lifetime,
            });
        }

        Ok(token.value)
    }
}
