//! Listing types.
//!
//! This module contains the priced product observation shared by catalog
//! data and search extraction:
//! - [`Listing`] - A laptop offer in its origin currency
//! - [`Currency`] - Origin currency tag
//! - [`LaptopSpecs`] - Hardware summary strings

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Currency
// ============================================================================

/// Origin currency of a listing.
///
/// Tags are matched exactly (`"RON"`, `"UAH"`, `"USD"`). Anything else is
/// kept verbatim in [`Currency::Other`] and cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    /// Romanian leu.
    Ron,
    /// Ukrainian hryvnia (the display currency).
    Uah,
    /// US dollar.
    Usd,
    /// Unrecognized tag.
    Other(String),
}

impl Currency {
    /// Returns the tag as written in listings.
    pub fn code(&self) -> &str {
        match self {
            Currency::Ron => "RON",
            Currency::Uah => "UAH",
            Currency::Usd => "USD",
            Currency::Other(tag) => tag,
        }
    }

    /// Returns true if the converter knows this currency.
    pub fn is_convertible(&self) -> bool {
        !matches!(self, Currency::Other(_))
    }
}

impl Default for Currency {
    /// A listing without a currency is unconvertible.
    fn default() -> Self {
        Currency::Other(String::new())
    }
}

impl From<String> for Currency {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "RON" => Currency::Ron,
            "UAH" => Currency::Uah,
            "USD" => Currency::Usd,
            _ => Currency::Other(tag),
        }
    }
}

impl From<&str> for Currency {
    fn from(tag: &str) -> Self {
        Currency::from(tag.to_string())
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Other(tag) => tag,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Specs
// ============================================================================

/// Hardware summary of a laptop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaptopSpecs {
    /// Processor, e.g. "i7-13650HX".
    #[serde(deserialize_with = "lenient::string")]
    pub cpu: String,
    /// Memory, e.g. "16GB".
    #[serde(deserialize_with = "lenient::string")]
    pub ram: String,
    /// Storage, e.g. "512GB".
    #[serde(deserialize_with = "lenient::string")]
    pub storage: String,
    /// Graphics, e.g. "RTX 4060".
    #[serde(deserialize_with = "lenient::string")]
    pub gpu: String,
    /// Display, e.g. "16\" FHD+".
    #[serde(deserialize_with = "lenient::string")]
    pub screen: String,
}

impl LaptopSpecs {
    /// One-line summary for tables.
    pub fn summary(&self) -> String {
        [&self.cpu, &self.gpu, &self.ram, &self.storage, &self.screen]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

// ============================================================================
// Listing
// ============================================================================

/// A single priced laptop offer, in its origin currency.
///
/// Listings come from catalog files or from search replies. Fields are
/// read leniently: missing strings become empty, a numeric string price is
/// accepted, and unknown fields survive in [`Listing::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Identifier (injected by the search parser).
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Model name, e.g. "ASUS ROG Strix G16".
    #[serde(default, deserialize_with = "lenient::string")]
    pub model_name: String,
    /// Hardware summary.
    #[serde(default, deserialize_with = "lenient::specs")]
    pub specs: LaptopSpecs,
    /// Price in the origin currency.
    #[serde(default, deserialize_with = "lenient::price")]
    pub price_original: f64,
    /// Origin currency.
    #[serde(default, deserialize_with = "lenient::currency")]
    pub currency: Currency,
    /// Store name, e.g. "eMAG.ro".
    #[serde(default, deserialize_with = "lenient::string")]
    pub store_name: String,
    /// Store country code ("RO" or "UA").
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: String,
    /// Product page link.
    #[serde(default, deserialize_with = "lenient::string")]
    pub link: String,
    /// Free-text notes.
    #[serde(
        default,
        deserialize_with = "lenient::notes",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    /// Any fields not listed above, preserved as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Listing {
    /// Creates a listing with the given model, price and currency.
    pub fn new(model_name: impl Into<String>, price_original: f64, currency: Currency) -> Self {
        Self {
            model_name: model_name.into(),
            price_original,
            currency,
            ..Self::default()
        }
    }

    /// Sets the store name.
    #[must_use]
    pub fn with_store(mut self, store_name: impl Into<String>, country: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self.country = country.into();
        self
    }

    /// Sets the hardware specs.
    #[must_use]
    pub fn with_specs(mut self, specs: LaptopSpecs) -> Self {
        self.specs = specs;
        self
    }
}

// ============================================================================
// Lenient field readers
// ============================================================================

mod lenient {
    use super::{Currency, Deserialize, Deserializer, LaptopSpecs, Value};

    fn value_to_string(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(value_to_string(Value::deserialize(deserializer)?))
    }

    pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    pub fn notes<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            other => Some(value_to_string(other)),
        })
    }

    pub fn currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Currency::from(value_to_string(Value::deserialize(deserializer)?)))
    }

    pub fn specs<'de, D>(deserializer: D) -> Result<LaptopSpecs, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_object() {
            Ok(serde_json::from_value(value).unwrap_or_default())
        } else {
            Ok(LaptopSpecs::default())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
