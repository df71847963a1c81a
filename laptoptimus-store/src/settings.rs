//! User settings.
//!
//! Settings are read once at startup from a camelCase JSON file:
//!
//! ```json
//! {
//!   "exchange": { "usdBuyRate": 41.5, "ronToUsdFactor": 0.22, "romanianDeliveryRate": 400 },
//!   "search": { "model": "gemini-3-flash-preview", "apiKeyEnv": "GEMINI_API_KEY" },
//!   "logLevel": "info"
//! }
//! ```
//!
//! Every section and field is optional. A missing file yields defaults; a
//! malformed one is an error.

use laptoptimus_core::{DeliveryRates, ExchangeSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::load_json_or_default;

/// Variable read when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Conversion parameters.
    pub exchange: ExchangeSettings,

    /// Carrier and customs parameters.
    pub delivery: DeliveryRates,

    /// Search service settings.
    pub search: SearchSettings,

    /// Log level.
    pub log_level: LogLevel,
}

/// Search service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSettings {
    /// Model id.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// API base URL.
    pub base_url: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Attempts per call, including the first.
    pub max_attempts: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
            max_attempts: 2,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    /// Loads settings from `path`, falling back to defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, decoded, or
    /// validated.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let settings: Settings = load_json_or_default(path).await?;
        settings.validate()?;

        info!(
            path = %path.display(),
            usd_buy_rate = settings.exchange.usd_buy_rate,
            model = %settings.search.model,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Checks every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), StoreError> {
        self.exchange.validate()?;

        let rates = &self.delivery;
        let positive = [
            ("delivery.ronPerEur", rates.ron_per_eur),
            ("delivery.uahPerEur", rates.uah_per_eur),
        ];
        let non_negative = [
            ("delivery.shippingPerKgEur", rates.shipping_per_kg_eur),
            ("delivery.baseFeeEur", rates.base_fee_eur),
            ("delivery.insuranceRate", rates.insurance_rate),
            ("delivery.customsThresholdEur", rates.customs_threshold_eur),
            ("delivery.dutyRate", rates.duty_rate),
            ("delivery.vatRate", rates.vat_rate),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(StoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(StoreError::Config(format!("{name} must not be negative, got {value}")));
            }
        }

        let search = &self.search;
        if search.model.trim().is_empty() {
            return Err(StoreError::Config("search.model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&search.temperature) {
            return Err(StoreError::Config(format!(
                "search.temperature must be between 0 and 2, got {}",
                search.temperature
            )));
        }
        if search.timeout_secs == 0 {
            return Err(StoreError::Config("search.timeoutSecs must be at least 1".to_string()));
        }
        if search.max_attempts == 0 {
            return Err(StoreError::Config("search.maxAttempts must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Resolves the API key with the given variable lookup.
    ///
    /// Tries `search.apiKeyEnv` first, then [`FALLBACK_API_KEY_ENV`]. Blank
    /// values count as unset.
    pub fn resolve_api_key<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        [self.search.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .find_map(|var| {
                let value = lookup(var).filter(|v| !v.trim().is_empty())?;
                debug!(var, "API key found");
                Some(value)
            })
    }

    /// Resolves the API key from the process environment.
    pub fn api_key_from_env(&self) -> Option<String> {
        self.resolve_api_key(|var| std::env::var(var).ok())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.exchange, ExchangeSettings::default());
        assert_eq!(settings.search.model, "gemini-3-flash-preview");
        assert_eq!(settings.search.api_key_env, "GEMINI_API_KEY");
        assert_eq!(settings.search.max_attempts, 2);
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_camel_case() {
        let json = r#"{
            "exchange": { "usdBuyRate": 42.1 },
            "search": { "apiKeyEnv": "LAPTOP_KEY", "timeoutSecs": 10 },
            "logLevel": "debug"
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.exchange.usd_buy_rate, 42.1);
        assert_eq!(settings.exchange.ron_to_usd_factor, 0.22);
        assert_eq!(settings.search.api_key_env, "LAPTOP_KEY");
        assert_eq!(settings.search.timeout_secs, 10);
        assert_eq!(settings.search.temperature, 0.7);
        assert_eq!(settings.delivery, DeliveryRates::default());
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.exchange.usd_buy_rate = 0.0;
        assert!(matches!(settings.validate(), Err(StoreError::Config(_))));

        let mut settings = Settings::default();
        settings.delivery.ron_per_eur = -1.0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("delivery.ronPerEur"));

        let mut settings = Settings::default();
        settings.search.max_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.search.temperature = 3.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_resolve_api_key_order() {
        let settings = Settings::default();
        let env: HashMap<&str, &str> =
            HashMap::from([("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]);
        let key = settings.resolve_api_key(|var| env.get(var).map(|v| (*v).to_string()));
        assert_eq!(key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_resolve_api_key_fallback() {
        let settings = Settings::default();
        let env: HashMap<&str, &str> = HashMap::from([("GEMINI_API_KEY", "  "), ("API_KEY", "fallback")]);
        let key = settings.resolve_api_key(|var| env.get(var).map(|v| (*v).to_string()));
        assert_eq!(key.as_deref(), Some("fallback"));

        assert!(settings.resolve_api_key(|_| None).is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join("settings.json")).await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"exchange": {"romanianDeliveryRate": 350}}"#)
            .await
            .unwrap();

        let settings = Settings::load(&path).await.unwrap();
        assert_eq!(settings.exchange.romanian_delivery_rate, 350.0);
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"exchange": {"usdBuyRate": "lots"}}"#).await.unwrap();

        assert!(matches!(
            Settings::load(&path).await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_load_invalid_rates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"exchange": {"ronToUsdFactor": -0.2}}"#).await.unwrap();

        assert!(matches!(Settings::load(&path).await, Err(StoreError::Config(_))));
    }
}
