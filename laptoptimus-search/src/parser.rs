//! Search reply parser.
//!
//! The search service is asked to end its answer with a fenced JSON array
//! of offers. Models don't always comply, so extraction is best-effort:
//!
//! 1. Find the first `[ { ... } ]` shaped substring (greedy, spanning lines).
//! 2. Strip code fences and decode it as JSON.
//! 3. Turn each object into a [`Listing`] and give it a fresh id.
//!
//! Any miss along the way yields [`Extraction::NotFound`]. The reply text is
//! always returned untouched.

use chrono::Utc;
use laptoptimus_core::{Extraction, Listing, ParsedSearchResult};
use regex::Regex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::grounding::{map_sources, GroundingMetadata};

// ============================================================================
// Regex Patterns
// ============================================================================

/// Array of objects: `[`, optional whitespace, `{`, anything, `}`, `]`.
static LISTING_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("Invalid regex"));

/// Process-wide id sequence; ids never repeat within a process.
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Parser
// ============================================================================

/// Parser for search reply text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResponseParser;

impl SearchResponseParser {
    /// Parses reply text without grounding metadata.
    pub fn parse(raw_text: &str) -> ParsedSearchResult {
        Self::parse_with_grounding(raw_text, None)
    }

    /// Parses reply text and maps the grounding citations that came with it.
    pub fn parse_with_grounding(
        raw_text: &str,
        grounding: Option<&GroundingMetadata>,
    ) -> ParsedSearchResult {
        debug!(len = raw_text.len(), "Parsing search reply");

        let extraction = Self::extract(raw_text);
        let sources = map_sources(grounding);

        ParsedSearchResult::new(raw_text, extraction, sources)
    }

    /// Extracts the listing array embedded in `text`.
    pub fn extract(text: &str) -> Extraction {
        let Some(found) = LISTING_ARRAY_RE.find(text) else {
            debug!("No listing array in reply");
            return Extraction::NotFound;
        };

        let block = clean_json_block(found.as_str());
        let value: Value = match serde_json::from_str(block) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Listing array is not valid JSON, ignoring");
                return Extraction::NotFound;
            }
        };

        let Value::Array(items) = value else {
            warn!("Listing block decoded to a non-array value, ignoring");
            return Extraction::NotFound;
        };

        let listings: Vec<Listing> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| decode_listing(index, item))
            .collect();

        if listings.is_empty() {
            warn!("Listing array held no usable entries");
            return Extraction::NotFound;
        }

        debug!(count = listings.len(), "Extracted listings");
        Extraction::Found(listings)
    }
}

fn decode_listing(index: usize, item: Value) -> Option<Listing> {
    if !item.is_object() {
        warn!(index, "Skipping non-object entry in listing array");
        return None;
    }

    match serde_json::from_value::<Listing>(item) {
        Ok(mut listing) => {
            listing.id = next_listing_id();
            Some(listing)
        }
        Err(e) => {
            warn!(index, error = %e, "Skipping undecodable listing");
            None
        }
    }
}

/// Generates a listing id: `gen-<unix millis>-<sequence>`.
pub fn next_listing_id() -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("gen-{}-{}", Utc::now().timestamp_millis(), seq)
}

/// Strips surrounding code fences from a JSON block.
pub fn clean_json_block(block: &str) -> &str {
    let mut clean = block.trim();
    if let Some(rest) = clean.strip_prefix("```json") {
        clean = rest;
    } else if let Some(rest) = clean.strip_prefix("```") {
        clean = rest;
    }
    if let Some(rest) = clean.strip_suffix("```") {
        clean = rest;
    }
    clean.trim()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use laptoptimus_core::Currency;

    const REPLY: &str = r#"Нашёл вариант на eMAG.

```json
[
  {
    "modelName": "ASUS ROG Strix G16 G614JV",
    "specs": { "cpu": "i7-13650HX", "ram": "16GB", "storage": "512GB", "gpu": "RTX 4060", "screen": "16\" FHD+" },
    "priceOriginal": 6499,
    "currency": "RON",
    "storeName": "eMAG.ro",
    "country": "RO",
    "link": "https://www.emag.ro/asus-rog-strix-g16",
    "notes": "Resigilat"
  }
]
```"#;

    #[test]
    fn test_parse_single_listing() {
        let result = SearchResponseParser::parse(REPLY);

        assert_eq!(result.products.len(), 1);
        let listing = &result.products[0];
        assert_eq!(listing.model_name, "ASUS ROG Strix G16 G614JV");
        assert_eq!(listing.specs.cpu, "i7-13650HX");
        assert_eq!(listing.specs.screen, "16\" FHD+");
        assert_eq!(listing.price_original, 6499.0);
        assert_eq!(listing.currency, Currency::Ron);
        assert_eq!(listing.store_name, "eMAG.ro");
        assert_eq!(listing.country, "RO");
        assert_eq!(listing.link, "https://www.emag.ro/asus-rog-strix-g16");
        assert_eq!(listing.notes.as_deref(), Some("Resigilat"));
        assert!(listing.id.starts_with("gen-"));
        assert_eq!(result.text, REPLY);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_no_array_keeps_text() {
        let text = "Sorry, I could not find that model in Romanian stores.";
        let result = SearchResponseParser::parse(text);
        assert!(result.products.is_empty());
        assert_eq!(result.text, text);
    }

    #[test]
    fn test_trailing_comma_degrades() {
        let text = "Offers:\n```json\n[{\"modelName\": \"HP Omen 16\", \"priceOriginal\": 5200,}]\n```";
        let result = SearchResponseParser::parse(text);
        assert!(result.products.is_empty());
        assert_eq!(result.text, text);
    }

    #[test]
    fn test_ids_differ_across_parses() {
        let first = SearchResponseParser::parse(REPLY);
        let second = SearchResponseParser::parse(REPLY);

        let (a, b) = (&first.products[0], &second.products[0]);
        assert_ne!(a.id, b.id);

        let mut a = a.clone();
        a.id.clone_from(&b.id);
        assert_eq!(&a, b);
    }

    #[test]
    fn test_ids_unique_within_parse() {
        let text = r#"[{"modelName": "A"}, {"modelName": "B"}, {"modelName": "C"}]"#;
        let result = SearchResponseParser::parse(text);
        assert_eq!(result.products.len(), 3);
        assert_ne!(result.products[0].id, result.products[1].id);
        assert_ne!(result.products[1].id, result.products[2].id);
    }

    #[test]
    fn test_clean_json_block() {
        assert_eq!(clean_json_block("```json\n[1]\n```"), "[1]");
        assert_eq!(clean_json_block("```\n[1]\n```"), "[1]");
        assert_eq!(clean_json_block("  [1]  "), "[1]");
    }

    #[test]
    fn test_extract_variants() {
        assert_eq!(SearchResponseParser::extract("no json"), Extraction::NotFound);
        assert_eq!(SearchResponseParser::extract("[1, 2, 3]"), Extraction::NotFound);
        assert!(SearchResponseParser::extract(r#"[{"modelName": "X"}]"#).is_found());
    }

    #[test]
    fn test_grounding_passed_through() {
        let meta: GroundingMetadata = serde_json::from_str(
            r#"{"groundingChunks": [{"web": {"uri": "https://www.emag.ro/", "title": "eMAG"}}]}"#,
        )
        .unwrap();

        let result = SearchResponseParser::parse_with_grounding(REPLY, Some(&meta));
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "eMAG");
        assert_eq!(result.products.len(), 1);
    }
}
