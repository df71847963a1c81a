//! Catalog record types.
//!
//! Catalog records are listings tracked over time. Their status and price
//! history are display data supplied from outside; nothing here computes or
//! transitions them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::listing::Listing;

/// Display label attached to a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// First seen in the latest check.
    New,
    /// Price changed since the previous check.
    Updated,
    /// Unchanged.
    #[default]
    Stable,
    /// No longer listed by the store.
    Deleted,
}

impl ListingStatus {
    /// All labels, in display order.
    pub fn all() -> &'static [ListingStatus] {
        &[
            ListingStatus::New,
            ListingStatus::Updated,
            ListingStatus::Stable,
            ListingStatus::Deleted,
        ]
    }

    /// Parses a label as written in catalog files.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "new" => Some(ListingStatus::New),
            "updated" => Some(ListingStatus::Updated),
            "stable" => Some(ListingStatus::Stable),
            "deleted" => Some(ListingStatus::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::New => write!(f, "new"),
            ListingStatus::Updated => write!(f, "updated"),
            ListingStatus::Stable => write!(f, "stable"),
            ListingStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// One observed price in a record's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date label, e.g. "27.05".
    pub date: String,
    /// Price in the listing's origin currency.
    pub price: f64,
}

/// A listing as tracked in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Status label.
    #[serde(default)]
    pub status: ListingStatus,
    /// When the record was last checked, as a free-text label.
    #[serde(default)]
    pub last_checked: String,
    /// Whether the store reports stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Price history, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_history: Vec<PricePoint>,
    /// The underlying listing.
    #[serde(flatten)]
    pub listing: Listing,
}

fn default_in_stock() -> bool {
    true
}

impl CatalogItem {
    /// Wraps a listing with a status label.
    pub fn new(listing: Listing, status: ListingStatus) -> Self {
        Self {
            status,
            last_checked: String::new(),
            in_stock: true,
            price_history: Vec::new(),
            listing,
        }
    }

    /// Badge text shown next to the record.
    ///
    /// Out-of-stock wins over the status label.
    pub fn badge(&self) -> &'static str {
        if !self.in_stock {
            return "out of stock";
        }
        match self.status {
            ListingStatus::New => "new",
            ListingStatus::Updated => "price changed",
            ListingStatus::Stable | ListingStatus::Deleted => "stable",
        }
    }

    /// Lowest price in the history, if any.
    pub fn lowest_recorded_price(&self) -> Option<f64> {
        self.price_history
            .iter()
            .map(|p| p.price)
            .min_by(f64::total_cmp)
    }
}
