// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # LaptOptimus Store
//!
//! Read-only data access for the LaptOptimus application.
//!
//! This crate provides:
//!
//! - **Settings**: exchange rates, delivery rates, and search settings loaded
//!   from a JSON file, plus API key resolution
//! - **Catalog**: the [`CatalogSource`] collaborator and its JSON file
//!   implementation
//! - **Persistence**: default paths and JSON loading helpers
//!
//! Nothing here writes application data.
//!
//! ## Usage
//!
//! ```ignore
//! use laptoptimus_store::{default_settings_path, CatalogSource, JsonCatalog, Settings};
//!
//! let settings = Settings::load(&default_settings_path()).await?;
//! let items = JsonCatalog::new("catalog.json").items().await?;
//! ```

pub mod catalog;
pub mod error;
pub mod persistence;
pub mod settings;

pub use catalog::{CatalogSource, JsonCatalog};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, load_json, load_json_or_default};
pub use settings::{LogLevel, SearchSettings, Settings, FALLBACK_API_KEY_ENV};
