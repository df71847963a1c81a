//! Price conversion into the display currency (UAH).
//!
//! The formula is fixed and applied the same way by every view:
//!
//! | Currency | UAH price |
//! |----------|-----------|
//! | `UAH` | `price` |
//! | `RON` | `(price * ronToUsdFactor * usdBuyRate) + romanianDeliveryRate` |
//! | `USD` | `price * usdBuyRate` |
//! | other | `0` (not convertible) |
//!
//! The converter never rounds. Anything shown to a user goes through
//! [`round_display`] so the same input always prints the same integer.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{Currency, ExchangeSettings, Listing};

/// Converts a listing's price into UAH.
///
/// Returns `0.0` for currencies the converter does not know.
pub fn convert(listing: &Listing, settings: &ExchangeSettings) -> f64 {
    convert_amount(listing.price_original, &listing.currency, settings)
}

/// Converts a bare amount in `currency` into UAH.
pub fn convert_amount(amount: f64, currency: &Currency, settings: &ExchangeSettings) -> f64 {
    match currency {
        Currency::Uah => amount,
        Currency::Ron => {
            (amount * settings.ron_to_usd_factor * settings.usd_buy_rate)
                + settings.romanian_delivery_rate
        }
        Currency::Usd => amount * settings.usd_buy_rate,
        Currency::Other(_) => 0.0,
    }
}

/// Rounds a UAH amount for display: nearest integer, ties away from zero.
#[allow(clippy::cast_possible_truncation)]
pub fn round_display(value: f64) -> i64 {
    value.round() as i64
}

/// Formats an integer with `,` thousands separators.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Display Price
// ============================================================================

/// A UAH price as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPrice {
    /// Rounded UAH amount.
    Amount(i64),
    /// The listing's currency cannot be converted.
    NotAvailable,
}

impl DisplayPrice {
    /// Returns the rounded amount, if any.
    pub fn amount(&self) -> Option<i64> {
        match self {
            DisplayPrice::Amount(v) => Some(*v),
            DisplayPrice::NotAvailable => None,
        }
    }
}

impl fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayPrice::Amount(v) => f.write_str(&group_thousands(*v)),
            DisplayPrice::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for DisplayPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayPrice::Amount(v) => serializer.serialize_i64(*v),
            DisplayPrice::NotAvailable => serializer.serialize_none(),
        }
    }
}

// ============================================================================
// Price Converter
// ============================================================================

/// Converter bound to one set of exchange settings.
///
/// Views build one per render from the settings they were handed.
#[derive(Debug, Clone, Copy)]
pub struct PriceConverter {
    settings: ExchangeSettings,
}

impl PriceConverter {
    /// Creates a converter for the given settings.
    pub fn new(settings: ExchangeSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &ExchangeSettings {
        &self.settings
    }

    /// Unrounded UAH price, `0.0` if unconvertible.
    pub fn convert(&self, listing: &Listing) -> f64 {
        convert(listing, &self.settings)
    }

    /// UAH price ready for display.
    pub fn quote(&self, listing: &Listing) -> DisplayPrice {
        if listing.currency.is_convertible() {
            DisplayPrice::Amount(round_display(self.convert(listing)))
        } else {
            DisplayPrice::NotAvailable
        }
    }

    /// Worked example of the RON formula, e.g. for `1000` RON.
    pub fn formula_example(&self, amount_ron: f64) -> String {
        let s = &self.settings;
        let result = convert_amount(amount_ron, &Currency::Ron, s);
        format!(
            "UAH = (RON x {} x {}) + {}; {} RON = {} UAH",
            s.ron_to_usd_factor,
            s.usd_buy_rate,
            s.romanian_delivery_rate,
            amount_ron,
            group_thousands(round_display(result))
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ExchangeSettings {
        ExchangeSettings::new(41.5, 0.22, 400.0)
    }

    #[test]
    fn test_ron_formula() {
        let listing = Listing::new("ASUS ROG Strix G16", 6499.0, Currency::Ron);
        let uah = convert(&listing, &settings());
        assert_eq!(uah, 6499.0 * 0.22 * 41.5 + 400.0);
        assert!((uah - 60090.175).abs() < 1e-9);
        assert_eq!(round_display(uah), 60090);
    }

    #[test]
    fn test_uah_is_identity() {
        let listing = Listing::new("Acer Nitro 16", 42000.0, Currency::Uah);
        assert_eq!(convert(&listing, &settings()), 42000.0);
        assert_eq!(convert(&listing, &ExchangeSettings::new(1.0, 1.0, 99999.0)), 42000.0);
    }

    #[test]
    fn test_usd_formula() {
        let listing = Listing::new("MacBook Air", 999.0, Currency::Usd);
        assert_eq!(convert(&listing, &settings()), 999.0 * 41.5);
    }

    #[test]
    fn test_unknown_currency_is_zero() {
        let listing = Listing::new("Dell XPS", 1200.0, Currency::from("EUR"));
        assert_eq!(convert(&listing, &settings()), 0.0);
        assert_eq!(PriceConverter::new(settings()).quote(&listing), DisplayPrice::NotAvailable);
    }

    #[test]
    fn test_round_display_ties_away_from_zero() {
        assert_eq!(round_display(2.5), 3);
        assert_eq!(round_display(-2.5), -3);
        assert_eq!(round_display(2.4999), 2);
        assert_eq!(round_display(60090.5), 60091);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(60090), "60,090");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-1000), "-1,000");
    }

    #[test]
    fn test_display_price_rendering() {
        assert_eq!(DisplayPrice::Amount(60090).to_string(), "60,090");
        assert_eq!(DisplayPrice::NotAvailable.to_string(), "N/A");
        assert_eq!(serde_json::to_string(&DisplayPrice::NotAvailable).unwrap(), "null");
        assert_eq!(serde_json::to_string(&DisplayPrice::Amount(5)).unwrap(), "5");
    }

    #[test]
    fn test_zero_priced_uah_listing_still_quoted() {
        let listing = Listing::new("Placeholder", 0.0, Currency::Uah);
        assert_eq!(PriceConverter::new(settings()).quote(&listing), DisplayPrice::Amount(0));
    }

    #[test]
    fn test_formula_example() {
        let example = PriceConverter::new(settings()).formula_example(1000.0);
        // 1000 * 0.22 * 41.5 + 400 = 9530
        assert!(example.ends_with("1000 RON = 9,530 UAH"), "{example}");
    }
}
