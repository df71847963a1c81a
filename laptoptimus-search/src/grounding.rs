//! Grounding citations.
//!
//! Gemini reports the web pages it used in `groundingMetadata`, separately
//! from the reply text:
//!
//! ```json
//! {
//!   "groundingChunks": [
//!     { "web": { "uri": "https://www.emag.ro/...", "title": "emag.ro" } }
//!   ]
//! }
//! ```

use laptoptimus_core::Source;
use serde::Deserialize;

/// Title used when a chunk has none.
pub const PLACEHOLDER_TITLE: &str = "Source";

/// Grounding metadata attached to a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Supporting chunks.
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,

    /// Queries the service ran.
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

/// One supporting chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    /// Web page reference, absent for non-web chunks.
    #[serde(default)]
    pub web: Option<WebChunk>,
}

/// Web page reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebChunk {
    /// Page URI.
    #[serde(default)]
    pub uri: Option<String>,
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
}

impl WebChunk {
    /// Creates a web chunk.
    pub fn new(uri: Option<&str>, title: Option<&str>) -> Self {
        Self {
            uri: uri.map(str::to_string),
            title: title.map(str::to_string),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Maps grounding chunks to citation pairs.
///
/// Chunks without a web reference or without a usable URI are dropped;
/// missing titles get [`PLACEHOLDER_TITLE`].
pub fn map_sources(metadata: Option<&GroundingMetadata>) -> Vec<Source> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };

    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = non_blank(web.uri.as_deref()).filter(|u| *u != "#")?;
            let title = non_blank(web.title.as_deref()).unwrap_or(PLACEHOLDER_TITLE);
            Some(Source::new(title, uri))
        })
        .collect()
}
