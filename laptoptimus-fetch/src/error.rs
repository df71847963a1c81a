//! Fetch error types.

use thiserror::Error;

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error (connect, timeout, TLS, body).
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Returns true if the underlying request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Request(e) if e.is_timeout())
    }

    /// Returns true if the connection could not be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, HttpError::Request(e) if e.is_connect())
    }
}
