// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `LaptOptimus` Core
//!
//! Core types and pricing logic for the `LaptOptimus` laptop price comparison
//! tool (Romanian stores in RON vs. the Ukrainian market in UAH).
//!
//! This crate provides the foundational pieces used across all other
//! `LaptOptimus` crates:
//!
//! - Domain models (listings, exchange settings, catalog records, search results)
//! - The RON/USD/UAH price converter and display rounding
//! - The RO to UA delivery cost estimate
//! - Error types
//!
//! ## Key Types
//!
//! ### Listings
//! - [`Listing`] - A single priced laptop observation
//! - [`Currency`] - Listing currency tag (`RON`, `UAH`, `USD`, or unknown)
//! - [`LaptopSpecs`] - CPU/RAM/storage/GPU/screen strings
//!
//! ### Pricing
//! - [`ExchangeSettings`] - The three conversion parameters
//! - [`PriceConverter`] - Converts listings into UAH
//! - [`DisplayPrice`] - Rounded UAH amount or "N/A"
//!
//! ### Search
//! - [`ParsedSearchResult`] - Reply text plus extracted listings and citations
//! - [`Extraction`] - Tagged outcome of structured extraction
//! - [`Source`] - Grounding citation
//!
//! ### Catalog & Delivery
//! - [`CatalogItem`] - Listing with status label and price history
//! - [`DeliveryCalculator`] - Landed-cost estimate for RO to UA shipping

pub mod converter;
pub mod delivery;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export pricing
pub use converter::{convert, convert_amount, group_thousands, round_display, DisplayPrice, PriceConverter};
pub use delivery::{DeliveryCalculator, DeliveryQuote, DeliveryRates, DeliveryRequest};

// Re-export all model types
pub use models::{
    // Listing types
    Currency,
    LaptopSpecs,
    Listing,
    // Exchange settings
    ExchangeSettings,
    // Catalog types
    CatalogItem,
    ListingStatus,
    PricePoint,
    // Search types
    Extraction,
    ParsedSearchResult,
    Source,
};
