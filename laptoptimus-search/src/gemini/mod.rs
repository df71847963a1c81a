//! Gemini search client.
//!
//! Queries go to the Generative Language API with Google Search grounding
//! enabled and a fixed system instruction (see [`prompt`]).
//!
//! ## API Endpoints
//!
//! - `POST /v1beta/models/{model}:generateContent` - one search turn
//!
//! ## Authentication
//!
//! An API key in the `x-goog-api-key` header. The key is required up front:
//! building a [`GeminiSearchClient`] without one fails with
//! [`SearchError::MissingCredentials`](crate::SearchError::MissingCredentials).
//!
//! ## Usage
//!
//! ```ignore
//! use laptoptimus_search::gemini::{GeminiConfig, GeminiSearchClient};
//!
//! let client = GeminiSearchClient::new(GeminiConfig::with_api_key(key))?;
//! let result = client.search("Lenovo Legion 5 cheapest in Romania").await?;
//! ```

// Modules
pub mod api;
mod client;
pub mod prompt;

// Re-exports
pub use client::{
    GeminiConfig, GeminiSearchClient, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
pub use prompt::SystemStats;
