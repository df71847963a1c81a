//! Search errors.

use laptoptimus_fetch::HttpError;
use thiserror::Error;

/// Errors surfaced by a search call.
///
/// Parsing problems never appear here; they degrade to an empty product
/// list instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API key configured.
    #[error("Missing API credentials: set {0}")]
    MissingCredentials(String),

    /// Unusable client settings (bad key characters, bad base URL).
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    /// The query was blank.
    #[error("Empty search query")]
    EmptyQuery,

    /// Network failure, timeout, or rejected URL.
    #[error("Search request failed: {0}")]
    Transport(#[from] HttpError),

    /// The service rejected the API key.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limited by the service.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Non-success reply from the service.
    #[error("Search service returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the reply body, if any.
        message: String,
    },

    /// The reply envelope could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Returns true for configuration problems that resubmitting won't fix.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SearchError::MissingCredentials(_) | SearchError::InvalidConfig(_)
        )
    }

    /// Returns true if resubmitting the same query may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Transport(e) => e.is_timeout() || e.is_connect(),
            SearchError::RateLimited(_) => true,
            SearchError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(HttpError::Request(err))
    }
}
