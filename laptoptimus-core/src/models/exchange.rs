//! Exchange settings for the UAH conversion.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default UAH per 1 USD.
pub const DEFAULT_USD_BUY_RATE: f64 = 41.5;

/// Default RON to USD multiplier.
pub const DEFAULT_RON_TO_USD_FACTOR: f64 = 0.22;

/// Default flat surcharge (UAH) for RON listings.
pub const DEFAULT_ROMANIAN_DELIVERY_RATE: f64 = 400.0;

/// The three parameters of the RON -> USD -> UAH conversion.
///
/// Callers own this value and pass it into every conversion. The converter
/// does not check it; [`ExchangeSettings::validate`] does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExchangeSettings {
    /// UAH per one US dollar.
    pub usd_buy_rate: f64,
    /// Multiplier converting RON to USD.
    pub ron_to_usd_factor: f64,
    /// Flat delivery surcharge in UAH, applied to RON listings only.
    pub romanian_delivery_rate: f64,
}

impl ExchangeSettings {
    /// Creates settings from explicit values.
    pub fn new(usd_buy_rate: f64, ron_to_usd_factor: f64, romanian_delivery_rate: f64) -> Self {
        Self {
            usd_buy_rate,
            ron_to_usd_factor,
            romanian_delivery_rate,
        }
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if any field is not finite, if
    /// either rate is not strictly positive, or if the surcharge is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("usdBuyRate", self.usd_buy_rate),
            ("ronToUsdFactor", self.ron_to_usd_factor),
            ("romanianDeliveryRate", self.romanian_delivery_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        if self.usd_buy_rate <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "usdBuyRate must be positive, got {}",
                self.usd_buy_rate
            )));
        }
        if self.ron_to_usd_factor <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "ronToUsdFactor must be positive, got {}",
                self.ron_to_usd_factor
            )));
        }
        if self.romanian_delivery_rate < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "romanianDeliveryRate must not be negative, got {}",
                self.romanian_delivery_rate
            )));
        }

        Ok(())
    }
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            usd_buy_rate: DEFAULT_USD_BUY_RATE,
            ron_to_usd_factor: DEFAULT_RON_TO_USD_FACTOR,
            romanian_delivery_rate: DEFAULT_ROMANIAN_DELIVERY_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ExchangeSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.usd_buy_rate, 41.5);
        assert_eq!(settings.ron_to_usd_factor, 0.22);
        assert_eq!(settings.romanian_delivery_rate, 400.0);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let settings = ExchangeSettings::new(0.0, 0.22, 400.0);
        assert!(matches!(settings.validate(), Err(CoreError::InvalidConfig(_))));

        let settings = ExchangeSettings::new(41.5, -0.1, 400.0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_delivery_allowed() {
        let settings = ExchangeSettings::new(41.5, 0.22, 0.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ExchangeSettings::new(f64::NAN, 0.22, 400.0).validate().is_err());
        assert!(ExchangeSettings::new(41.5, 0.22, f64::INFINITY).validate().is_err());
    }
}
