//! Search reply types.

use serde::{Deserialize, Serialize};

use super::listing::Listing;

/// Fence that introduces the structured block in a search reply.
const JSON_FENCE: &str = "```json";

/// A web source the search service used to support its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title.
    pub title: String,
    /// Page URI.
    pub uri: String,
}

impl Source {
    /// Creates a new source.
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Outcome of looking for structured listings inside a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A listing array was found and decoded.
    Found(Vec<Listing>),
    /// No usable listing array.
    NotFound,
}

impl Extraction {
    /// Returns true if listings were found.
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    /// Consumes the extraction, yielding the listings (empty when not found).
    pub fn into_listings(self) -> Vec<Listing> {
        match self {
            Extraction::Found(listings) => listings,
            Extraction::NotFound => Vec::new(),
        }
    }
}

/// A search reply with whatever structure could be extracted from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSearchResult {
    /// The full reply text, exactly as received.
    pub text: String,
    /// Listings extracted from the text, in order.
    pub products: Vec<Listing>,
    /// Grounding citations, in order.
    pub sources: Vec<Source>,
}

impl ParsedSearchResult {
    /// Creates a result from its parts.
    pub fn new(text: impl Into<String>, extraction: Extraction, sources: Vec<Source>) -> Self {
        Self {
            text: text.into(),
            products: extraction.into_listings(),
            sources,
        }
    }

    /// The prose portion of the reply: everything before the first JSON
    /// code fence.
    pub fn prose(&self) -> &str {
        self.text
            .split_once(JSON_FENCE)
            .map_or(self.text.as_str(), |(before, _)| before)
    }

    /// Returns true if any listings were extracted.
    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;

    #[test]
    fn test_prose_stops_at_fence() {
        let result = ParsedSearchResult {
            text: "Found two offers.\n```json\n[{}]\n```".to_string(),
            ..Default::default()
        };
        assert_eq!(result.prose(), "Found two offers.\n");
        assert!(result.text.ends_with("```"));
    }

    #[test]
    fn test_prose_without_fence_is_whole_text() {
        let result = ParsedSearchResult {
            text: "Nothing structured here.".to_string(),
            ..Default::default()
        };
        assert_eq!(result.prose(), "Nothing structured here.");
    }

    #[test]
    fn test_extraction_into_listings() {
        assert!(Extraction::NotFound.into_listings().is_empty());

        let found = Extraction::Found(vec![Listing::new("Lenovo Legion Slim 5", 5800.0, Currency::Ron)]);
        assert!(found.is_found());
        assert_eq!(found.into_listings().len(), 1);
    }
}
