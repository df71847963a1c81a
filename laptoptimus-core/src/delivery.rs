//! Landed-cost estimate for shipping a Romanian laptop to Ukraine.
//!
//! Shipping and customs are computed in EUR and brought into UAH at a fixed
//! EUR rate; the product itself goes through the exchange settings (without
//! the flat list surcharge, since shipping is quoted explicitly here).
//!
//! ```text
//! price_eur    = price_ron / ron_per_eur
//! shipping_eur = base_fee + weight * per_kg + (insurance ? price_eur * insurance_rate : 0)
//! customs_eur  = duty + vat   where excess = price_eur - threshold (only if enabled and > 0)
//!                              duty = excess * duty_rate, vat = (excess + duty) * vat_rate
//! total_uah    = price_ron * ronToUsdFactor * usdBuyRate + (shipping_eur + customs_eur) * uah_per_eur
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::ExchangeSettings;

// ============================================================================
// Rates
// ============================================================================

/// Fixed carrier and customs parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryRates {
    /// Carrier rate, EUR per kg.
    pub shipping_per_kg_eur: f64,
    /// Flat carrier fee, EUR.
    pub base_fee_eur: f64,
    /// Insurance as a fraction of the EUR product price.
    pub insurance_rate: f64,
    /// Duty-free import threshold, EUR.
    pub customs_threshold_eur: f64,
    /// Import duty on the excess over the threshold.
    pub duty_rate: f64,
    /// VAT on excess plus duty.
    pub vat_rate: f64,
    /// RON per EUR.
    pub ron_per_eur: f64,
    /// UAH per EUR.
    pub uah_per_eur: f64,
}

impl Default for DeliveryRates {
    fn default() -> Self {
        Self {
            shipping_per_kg_eur: 3.0,
            base_fee_eur: 10.0,
            insurance_rate: 0.01,
            customs_threshold_eur: 150.0,
            duty_rate: 0.10,
            vat_rate: 0.20,
            ron_per_eur: 4.97,
            uah_per_eur: 45.0,
        }
    }
}

// ============================================================================
// Request & Quote
// ============================================================================

/// A parcel to price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryRequest {
    /// Parcel weight in kg.
    pub weight_kg: f64,
    /// Product price in RON.
    pub price_ron: f64,
    /// Insure the parcel.
    pub insurance: bool,
    /// Add Ukrainian import duty and VAT.
    pub include_customs: bool,
}

impl Default for DeliveryRequest {
    fn default() -> Self {
        Self {
            weight_kg: 2.5,
            price_ron: 5000.0,
            insurance: true,
            include_customs: false,
        }
    }
}

/// Cost breakdown in UAH (unrounded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQuote {
    /// Product price converted to UAH.
    pub product_uah: f64,
    /// Carrier cost including insurance.
    pub shipping_uah: f64,
    /// Duty plus VAT (zero when not applicable).
    pub customs_uah: f64,
    /// Sum of the above.
    pub total_uah: f64,
}

// ============================================================================
// Calculator
// ============================================================================

/// Computes landed cost for RO to UA deliveries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryCalculator {
    rates: DeliveryRates,
}

impl DeliveryCalculator {
    /// Creates a calculator with custom rates.
    pub fn new(rates: DeliveryRates) -> Self {
        Self { rates }
    }

    /// Returns the rates in use.
    pub fn rates(&self) -> &DeliveryRates {
        &self.rates
    }

    /// Prices a parcel.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for a negative or non-finite weight
    /// or price.
    pub fn quote(
        &self,
        request: &DeliveryRequest,
        settings: &ExchangeSettings,
    ) -> Result<DeliveryQuote, CoreError> {
        if !request.weight_kg.is_finite() || request.weight_kg < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "weight must be a non-negative number, got {}",
                request.weight_kg
            )));
        }
        if !request.price_ron.is_finite() || request.price_ron < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "price must be a non-negative number, got {}",
                request.price_ron
            )));
        }

        let r = &self.rates;
        let price_eur = request.price_ron / r.ron_per_eur;

        let insurance_eur = if request.insurance {
            price_eur * r.insurance_rate
        } else {
            0.0
        };
        let shipping_eur = r.base_fee_eur + (request.weight_kg * r.shipping_per_kg_eur) + insurance_eur;

        let mut customs_eur = 0.0;
        if request.include_customs && price_eur > r.customs_threshold_eur {
            let excess = price_eur - r.customs_threshold_eur;
            let duty = excess * r.duty_rate;
            let vat = (excess + duty) * r.vat_rate;
            customs_eur = duty + vat;
        }

        let product_uah = request.price_ron * settings.ron_to_usd_factor * settings.usd_buy_rate;
        let shipping_uah = shipping_eur * r.uah_per_eur;
        let customs_uah = customs_eur * r.uah_per_eur;

        Ok(DeliveryQuote {
            product_uah,
            shipping_uah,
            customs_uah,
            total_uah: product_uah + shipping_uah + customs_uah,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
