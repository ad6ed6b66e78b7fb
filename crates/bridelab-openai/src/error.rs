use thiserror::Error;

/// Errors that can be returned by completion requests.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The HTTP exchange failed before a usable response arrived (connect
    /// error, TLS failure, undecodable body, …).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `body` carries the
    /// provider's response text untouched so callers can surface it as-is.
    #[error("provider returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
}
