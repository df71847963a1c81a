//! Domain models for LaptOptimus.
//!
//! ## Submodules
//!
//! - [`listing`] - Listing types (Listing, Currency, LaptopSpecs)
//! - [`exchange`] - Exchange settings for the UAH conversion
//! - [`catalog`] - Catalog records (CatalogItem, ListingStatus, PricePoint)
//! - [`search`] - Search reply types (ParsedSearchResult, Extraction, Source)

mod catalog;
mod exchange;
mod listing;
mod search;

// Re-export everything at the models level
pub use catalog::{CatalogItem, ListingStatus, PricePoint};
pub use exchange::ExchangeSettings;
pub use listing::{Currency, LaptopSpecs, Listing};
pub use search::{Extraction, ParsedSearchResult, Source};
