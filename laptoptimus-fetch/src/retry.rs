//! Retry strategies for HTTP requests.

use reqwest::StatusCode;
use std::time::Duration;

/// Strategy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between retries in milliseconds.
    pub base_delay_ms: u64,
    /// Whether to use exponential backoff.
    pub exponential_backoff: bool,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryStrategy {
    /// Creates a new retry strategy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms: 1_000,
            exponential_backoff: true,
            max_delay_ms: 10_000,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
            exponential_backoff: false,
            max_delay_ms: 0,
        }
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enables or disables exponential backoff.
    #[must_use]
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Calculates the delay after a failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
            self.base_delay_ms.saturating_mul(factor)
        } else {
            self.base_delay_ms
        };

        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    /// Caps a server-supplied wait (`Retry-After`) at the maximum delay.
    pub fn clamp_delay(&self, delay: Duration) -> Duration {
        delay.min(Duration::from_millis(self.max_delay_ms))
    }

    /// Determines if a transport error should be retried.
    pub fn should_retry(&self, error: &reqwest::Error) -> bool {
        // Retry on connection errors and timeouts
        error.is_connect() || error.is_timeout()
    }

    /// Determines if a response status should be retried.
    pub fn should_retry_status(&self, status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }
}

impl Default for RetryStrategy {
    /// One retry after the first attempt.
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let strategy = RetryStrategy::new(5);

        assert_eq!(strategy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(strategy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(strategy.delay_for_attempt(4), Duration::from_secs(8));
    }

    #[test]
    fn test_max_delay_cap() {
        let strategy = RetryStrategy::new(10).with_base_delay(Duration::from_secs(3));

        assert_eq!(strategy.delay_for_attempt(5), Duration::from_secs(10));
    }

    #[test]
    fn test_fixed_delay() {
        let strategy = RetryStrategy::new(3)
            .with_base_delay(Duration::from_millis(250))
            .with_exponential_backoff(false);

        assert_eq!(strategy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_millis(250));
    }

    #[test]
    fn test_server_hint_clamped() {
        let strategy = RetryStrategy::new(2);

        assert_eq!(strategy.clamp_delay(Duration::from_secs(3600)), Duration::from_secs(10));
        assert_eq!(strategy.clamp_delay(Duration::from_secs(2)), Duration::from_secs(2));
        assert_eq!(RetryStrategy::no_retry().clamp_delay(Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_default_is_single_retry() {
        assert_eq!(RetryStrategy::default().max_attempts, 2);
        assert_eq!(RetryStrategy::no_retry().max_attempts, 1);
        assert_eq!(RetryStrategy::new(0).max_attempts, 1);
    }

    #[test]
    fn test_retryable_statuses() {
        let strategy = RetryStrategy::default();

        assert!(strategy.should_retry_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(strategy.should_retry_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(strategy.should_retry_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!strategy.should_retry_status(StatusCode::UNAUTHORIZED));
        assert!(!strategy.should_retry_status(StatusCode::BAD_REQUEST));
    }
}
