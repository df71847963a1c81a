//! HTTP client with tracing, bounded retries, and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - A request timeout on every call
//! - Retries on transient transport failures and 429/5xx replies
//! - Domain allowlist so credentials only go to the configured host

use reqwest::{header, header::HeaderMap, Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::HttpError;
use crate::retry::RetryStrategy;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for LaptOptimus.
const USER_AGENT: &str = concat!("LaptOptimus/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing, retries, and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
    retry_strategy: RetryStrategy,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
            retry_strategy: RetryStrategy::default(),
        })
    }

    /// Restricts requests to the given domains (and their subdomains).
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Sets the retry strategy for this client.
    #[must_use]
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Returns the retry strategy in use.
    pub fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry_strategy
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a POST request with a JSON body, retrying per the strategy.
    ///
    /// Non-success replies that are not retryable (or that stay failing after
    /// the last attempt) are returned as-is so the caller can map the status.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is rejected or the request could not be
    /// completed on the final attempt.
    #[instrument(skip(self, headers, body), fields(url = %url))]
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &T,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;

        let max_attempts = self.retry_strategy.max_attempts;
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "POST request with JSON");

            let result = self
                .inner
                .post(url)
                .headers(headers.clone())
                .json(body)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    debug!(status = %status, "Response received");

                    if attempts < max_attempts && self.retry_strategy.should_retry_status(status) {
                        let delay = response
                            .retry_after_secs()
                            .map(|secs| self.retry_strategy.clamp_delay(Duration::from_secs(secs)))
                            .unwrap_or_else(|| self.retry_strategy.delay_for_attempt(attempts));
                        warn!(
                            status = %status,
                            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                            "Retryable status, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if attempts < max_attempts && self.retry_strategy.should_retry(&e) {
                        let delay = self.retry_strategy.delay_for_attempt(attempts);
                        warn!(
                            error = %e,
                            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const UNAVAILABLE: &str =
        "HTTP/1.1 503 Service Unavailable\r\nRetry-After: 0\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const SLOW_DOWN: &str =
        "HTTP/1.1 429 Too Many Requests\r\nRetry-After: 3600\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const OK: &str =
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}";

    /// Answers one connection per canned reply and counts the requests seen.
    async fn serve(replies: Vec<&'static str>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                read_request(&mut socket).await;
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{addr}/v1/search"), hits)
    }

    /// Reads the request head and a `Content-Length` body.
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return;
            }
        }
    }

    #[tokio::test]
    async fn test_server_error_retried_once() {
        let (url, hits) = serve(vec![UNAVAILABLE, UNAVAILABLE, OK]).await;
        let client = HttpClient::new()
            .unwrap()
            .with_retry_strategy(RetryStrategy::new(2));

        let body = serde_json::json!({ "q": "laptop" });
        let response = client.post_json(&url, HeaderMap::new(), &body).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_long_retry_after_is_capped() {
        let (url, hits) = serve(vec![SLOW_DOWN, OK]).await;
        let client = HttpClient::new().unwrap().with_retry_strategy(
            RetryStrategy::new(2).with_max_delay(Duration::from_millis(50)),
        );

        let body = serde_json::json!({ "q": "laptop" });
        let response = tokio::time::timeout(
            Duration::from_secs(5),
            client.post_json(&url, HeaderMap::new(), &body),
        )
        .await
        .expect("retry wait should be capped")
        .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_success_not_retried() {
        let (url, hits) = serve(vec![OK, OK]).await;
        let client = HttpClient::new().unwrap();

        let body = serde_json::json!({ "q": "laptop" });
        let response = client.post_json(&url, HeaderMap::new(), &body).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_domain_allowlist() {
        let client = HttpClient::new()
            .unwrap()
            .with_allowed_domains(vec!["googleapis.com".to_string()]);

        // Subdomain matching
        assert!(client
            .is_domain_allowed("https://generativelanguage.googleapis.com/v1beta/models")
            .is_ok());
        assert!(client.is_domain_allowed("https://googleapis.com/").is_ok());

        // Not allowed
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
        assert!(client.is_domain_allowed("https://googleapis.com.evil.com/").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        let client = HttpClient::new().unwrap();

        // All domains allowed when no restrictions
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new().unwrap();
        assert!(matches!(
            client.is_domain_allowed("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_disallowed_domain_rejected_before_sending() {
        let client = HttpClient::new()
            .unwrap()
            .with_allowed_domains(vec!["googleapis.com".to_string()]);

        let body = serde_json::json!({ "q": "laptop" });
        let result = client
            .post_json("https://example.invalid/api", HeaderMap::new(), &body)
            .await;

        assert!(matches!(result, Err(HttpError::DomainNotAllowed(host)) if host == "example.invalid"));
    }

    #[test]
    fn test_retry_strategy_builder() {
        let client = HttpClient::new()
            .unwrap()
            .with_retry_strategy(RetryStrategy::no_retry());
        assert_eq!(client.retry_strategy().max_attempts, 1);
    }
}
