use thiserror::Error;

/// Errors raised while calling the proxy endpoints.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with a non-success status and `{error}` body.
    #[error("{function} returned {status}: {message}")]
    Status {
        function: &'static str,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {function}: {reason}")]
    Decode {
        function: &'static str,
        reason: String,
    },
}
