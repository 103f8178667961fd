//! Client credentials for the token exchange.

use std::fmt;

use crate::error_handler::{AuthError, env_opt};

pub const CLIENT_ID_VAR: &str = "GLOO_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "GLOO_CLIENT_SECRET";

/// Client id / secret pair. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenCredential {
    pub client_id: String,
    pub client_secret: String,
}

impl TokenCredential {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for TokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Where the credential pair comes from.
///
/// `Env` is read on every call so a missing secret only fails the request
/// that needed it.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Env,
    Static(TokenCredential),
}

impl CredentialSource {
    /// Resolves the pair for one request.
    ///
    /// # Errors
    /// [`AuthError::NotConfigured`] when either value is absent or blank.
    pub fn resolve(&self) -> Result<TokenCredential, AuthError> {
        let cred = match self {
            CredentialSource::Env => {
                let id = env_opt(CLIENT_ID_VAR).ok_or(AuthError::NotConfigured)?;
                let secret = env_opt(CLIENT_SECRET_VAR).ok_or(AuthError::NotConfigured)?;
                TokenCredential::new(id, secret)
            }
            CredentialSource::Static(c) => c.clone(),
        };

        if cred.client_id.trim().is_empty() || cred.client_secret.trim().is_empty() {
            return Err(AuthError::NotConfigured);
        }
        Ok(cred)
    }
}
