// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # LaptOptimus Search
//!
//! Natural-language laptop search for the LaptOptimus application.
//!
//! A query goes to Gemini with Google Search grounding and a fixed system
//! instruction asking for prose followed by a fenced JSON array of offers.
//! The reply is then parsed best-effort:
//!
//! - **Parser** ([`parser`]): finds the first listing array in the reply text,
//!   decodes it leniently, and stamps each listing with a fresh id
//! - **Grounding** ([`grounding`]): turns citation chunks into `(title, uri)`
//!   pairs
//! - **Gemini** ([`gemini`]): the HTTP client, request/response types, and
//!   prompts
//!
//! Parsing never fails. The only errors surfaced are configuration
//! (missing API key) and transport/service failures, see [`SearchError`].
//!
//! ## Usage
//!
//! ```ignore
//! use laptoptimus_search::{GeminiConfig, GeminiSearchClient, SearchService};
//!
//! let client = GeminiSearchClient::new(GeminiConfig::with_api_key(key))?;
//! let result = client.search("RTX 4060 laptop under 6000 RON").await?;
//! for listing in &result.products {
//!     println!("{} - {} {}", listing.model_name, listing.price_original, listing.currency);
//! }
//! ```

pub mod error;
pub mod gemini;
pub mod grounding;
pub mod parser;
pub mod service;

pub use error::SearchError;
pub use gemini::{GeminiConfig, GeminiSearchClient, SystemStats};
pub use grounding::{map_sources, GroundingChunk, GroundingMetadata, WebChunk};
pub use parser::SearchResponseParser;
pub use service::SearchService;
