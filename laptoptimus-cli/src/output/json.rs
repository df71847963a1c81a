//! JSON output formatting.

use anyhow::Result;
use laptoptimus_core::{
    CatalogItem, Currency, DeliveryQuote, DeliveryRequest, DisplayPrice, Listing,
    ParsedSearchResult, PriceConverter, Source,
};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// A listing with its UAH price.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingOutput<'a> {
    #[serde(flatten)]
    pub listing: &'a Listing,
    pub price_uah: DisplayPrice,
}

/// A parsed search reply.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    pub text: &'a str,
    pub products: Vec<ListingOutput<'a>>,
    pub sources: &'a [Source],
}

/// One conversion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutput {
    pub amount: f64,
    pub currency: Currency,
    pub exact_uah: f64,
    pub price_uah: DisplayPrice,
}

/// A catalog record with badge and UAH price.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemOutput<'a> {
    #[serde(flatten)]
    pub item: &'a CatalogItem,
    pub badge: &'static str,
    pub price_uah: DisplayPrice,
}

/// A landed-cost quote with its inputs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutput<'a> {
    pub price_ron: f64,
    pub weight_kg: f64,
    pub insurance: bool,
    pub include_customs: bool,
    #[serde(flatten)]
    pub quote: &'a DeliveryQuote,
}

/// Status commentary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsOutput<'a> {
    pub report: &'a str,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a search reply with converted prices.
    pub fn format_search(
        &self,
        result: &ParsedSearchResult,
        query: Option<&str>,
        converter: &PriceConverter,
    ) -> Result<String> {
        let output = SearchOutput {
            query,
            text: &result.text,
            products: listing_outputs(&result.products, converter),
            sources: &result.sources,
        };
        self.format(&output)
    }

    /// Formats one conversion.
    pub fn format_conversion(
        &self,
        amount: f64,
        currency: &Currency,
        converter: &PriceConverter,
    ) -> Result<String> {
        let listing = Listing::new("", amount, currency.clone());
        let output = ConversionOutput {
            amount,
            currency: currency.clone(),
            exact_uah: converter.convert(&listing),
            price_uah: converter.quote(&listing),
        };
        self.format(&output)
    }

    /// Formats catalog records.
    pub fn format_catalog(&self, items: &[CatalogItem], converter: &PriceConverter) -> Result<String> {
        let outputs: Vec<CatalogItemOutput<'_>> = items
            .iter()
            .map(|item| CatalogItemOutput {
                item,
                badge: item.badge(),
                price_uah: converter.quote(&item.listing),
            })
            .collect();
        self.format(&outputs)
    }

    /// Formats a landed-cost quote.
    pub fn format_delivery(&self, request: &DeliveryRequest, quote: &DeliveryQuote) -> Result<String> {
        self.format(&DeliveryOutput {
            price_ron: request.price_ron,
            weight_kg: request.weight_kg,
            insurance: request.insurance,
            include_customs: request.include_customs,
            quote,
        })
    }

    /// Formats status commentary.
    pub fn format_insights(&self, report: &str) -> Result<String> {
        self.format(&InsightsOutput { report })
    }
}

fn listing_outputs<'a>(listings: &'a [Listing], converter: &PriceConverter) -> Vec<ListingOutput<'a>> {
    listings
        .iter()
        .map(|listing| ListingOutput {
            listing,
            price_uah: converter.quote(listing),
        })
        .collect()
}
