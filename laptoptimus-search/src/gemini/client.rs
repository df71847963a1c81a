//! Gemini search client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use laptoptimus_core::ParsedSearchResult;
use laptoptimus_fetch::{HttpClient, RetryStrategy};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use tracing::{debug, info, instrument, warn};

use super::api::{error_message, GenerateContentRequest, GenerateContentResponse};
use super::prompt::{insights_prompt, SystemStats, SEARCH_SYSTEM_INSTRUCTION};
use crate::error::SearchError;
use crate::parser::SearchResponseParser;
use crate::service::SearchService;

// ============================================================================
// Constants
// ============================================================================

/// Generative Language API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for search turns.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Sampling temperature for search turns.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Attempts per call (one retry).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Environment variable named in credential errors when none is configured.
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Text used when the service returns an empty reply.
const EMPTY_REPLY: &str = "No response generated.";

const INSIGHTS_TEMPERATURE: f64 = 0.8;
const INSIGHTS_MAX_TOKENS: u32 = 200;
const INSIGHTS_FALLBACK: &str = "Could not fetch AI status insights.";
const INSIGHTS_EMPTY: &str = "System status: stable.";

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// Config
// ============================================================================

/// Gemini client settings.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` or blank fails client construction.
    pub api_key: Option<String>,
    /// Name of the variable the key was read from, for error messages.
    pub api_key_env: String,
    /// Model id.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// Sampling temperature for search turns.
    pub temperature: f64,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempts per call.
    pub max_attempts: u32,
}

impl GeminiConfig {
    /// Default settings with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Endpoint for `generateContent` on the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

// ============================================================================
// Client
// ============================================================================

/// Search client backed by the Gemini API.
#[derive(Debug)]
pub struct GeminiSearchClient {
    config: GeminiConfig,
    http: HttpClient,
    headers: HeaderMap,
}

impl GeminiSearchClient {
    /// Builds a client.
    ///
    /// # Errors
    ///
    /// Fails without touching the network if the key is missing or blank,
    /// the key is not a valid header value, or the base URL has no host.
    pub fn new(config: GeminiConfig) -> Result<Self, SearchError> {
        let key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SearchError::MissingCredentials(config.api_key_env.clone()))?;

        let mut key_value = HeaderValue::from_str(key).map_err(|_| {
            SearchError::InvalidConfig(format!(
                "{} contains characters not allowed in a header",
                config.api_key_env
            ))
        })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let host = Url::parse(&config.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or_else(|| {
                SearchError::InvalidConfig(format!("invalid base URL {}", config.base_url))
            })?;

        let http = HttpClient::with_timeout(config.timeout)?
            .with_allowed_domains(vec![host])
            .with_retry_strategy(RetryStrategy::new(config.max_attempts));

        debug!(model = %config.model, base_url = %config.base_url, "Gemini client ready");

        Ok(Self {
            config,
            http,
            headers,
        })
    }

    /// Returns the client settings.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Sends one `generateContent` call and decodes the reply.
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, SearchError> {
        let url = self.config.endpoint();
        let response = self
            .http
            .post_json(&url, self.headers.clone(), request)
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to decode generateContent reply");
            SearchError::InvalidResponse(format!("JSON error: {e}"))
        })
    }

    /// Asks for a two or three sentence status report on the given stats.
    ///
    /// Never fails: errors produce a fixed fallback line.
    #[instrument(skip(self, stats))]
    pub async fn system_insights(&self, stats: &SystemStats) -> String {
        let request = GenerateContentRequest::user_turn(insights_prompt(stats), INSIGHTS_TEMPERATURE)
            .with_max_output_tokens(INSIGHTS_MAX_TOKENS);

        match self.generate(&request).await {
            Ok(response) => {
                let text = response.text();
                if text.trim().is_empty() {
                    INSIGHTS_EMPTY.to_string()
                } else {
                    text
                }
            }
            Err(e) => {
                warn!(error = %e, "Status insights unavailable");
                INSIGHTS_FALLBACK.to_string()
            }
        }
    }
}

#[async_trait]
impl SearchService for GeminiSearchClient {
    #[instrument(skip(self), fields(model = %self.config.model))]
    async fn search(&self, query: &str) -> Result<ParsedSearchResult, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        info!("Searching");
        let request = GenerateContentRequest::user_turn(query, self.config.temperature)
            .with_system_instruction(SEARCH_SYSTEM_INSTRUCTION)
            .with_google_search();

        let response = self.generate(&request).await?;

        let mut text = response.text();
        if text.trim().is_empty() {
            warn!("Empty reply from search service");
            text = EMPTY_REPLY.to_string();
        }

        let result = SearchResponseParser::parse_with_grounding(&text, response.grounding());
        info!(
            products = result.products.len(),
            sources = result.sources.len(),
            "Search complete"
        );
        Ok(result)
    }
}

/// Maps a non-success status to a search error.
fn status_error(status: StatusCode, body: &str) -> SearchError {
    let message = error_message(body);
    warn!(status = %status, message = %message, "Search service error");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SearchError::AuthenticationFailed(message),
        StatusCode::TOO_MANY_REQUESTS => SearchError::RateLimited(message),
        _ => SearchError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_fails_fast() {
        let err = GeminiSearchClient::new(GeminiConfig::default()).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Missing API credentials: set GEMINI_API_KEY");
    }

    #[test]
    fn test_blank_key_fails_fast() {
        let mut config = GeminiConfig::with_api_key("   ");
        config.api_key_env = "API_KEY".to_string();
        let err = GeminiSearchClient::new(config).unwrap_err();
        assert!(matches!(err, SearchError::MissingCredentials(ref var) if var == "API_KEY"));
    }

    #[test]
    fn test_invalid_key_characters() {
        let err = GeminiSearchClient::new(GeminiConfig::with_api_key("bad\nkey")).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_client_builds_with_key() {
        let client = GeminiSearchClient::new(GeminiConfig::with_api_key("test-key")).unwrap();
        assert_eq!(client.config().model, DEFAULT_MODEL);
        assert_eq!(client.http.retry_strategy().max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::with_api_key("secret-value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_endpoint() {
        let config = GeminiConfig::default();
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );

        let config = GeminiConfig::default()
            .with_base_url("https://proxy.example.com/")
            .with_model("gemini-2.5-flash");
        assert_eq!(
            config.endpoint(),
            "https://proxy.example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = GeminiConfig::with_api_key("k").with_base_url("not a url");
        let err = GeminiSearchClient::new(config).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let client = GeminiSearchClient::new(GeminiConfig::with_api_key("test-key")).unwrap();
        let err = client.search(" \n ").await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error": {"code": 403, "message": "Permission denied"}}"#;
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, body),
            SearchError::AuthenticationFailed(ref m) if m == "Permission denied"
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            SearchError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "{}"),
            SearchError::RateLimited(_)
        ));

        let err = status_error(StatusCode::NOT_FOUND, r#"{"error": {"message": "model not found"}}"#);
        assert!(matches!(err, SearchError::Api { status: 404, ref message } if message == "model not found"));
    }
}
