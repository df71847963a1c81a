//! Search service seam.

use async_trait::async_trait;
use laptoptimus_core::ParsedSearchResult;

use crate::error::SearchError;

/// Something that answers a natural-language laptop query.
///
/// The CLI depends on this trait rather than on [`crate::GeminiSearchClient`]
/// so the command layer can be exercised with a canned implementation.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Runs one search turn and parses the reply.
    ///
    /// # Errors
    ///
    /// Returns an error for configuration problems or a failed service call.
    /// A reply without structured listings is not an error.
    async fn search(&self, query: &str) -> Result<ParsedSearchResult, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SearchResponseParser;

    struct CannedService(&'static str);

    #[async_trait]
    impl SearchService for CannedService {
        async fn search(&self, query: &str) -> Result<ParsedSearchResult, SearchError> {
            if query.trim().is_empty() {
                return Err(SearchError::EmptyQuery);
            }
            Ok(SearchResponseParser::parse(self.0))
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let service: Box<dyn SearchService> =
            Box::new(CannedService(r#"Found: [{"modelName": "Lenovo LOQ 15"}]"#));

        let result = service.search("lenovo loq").await.unwrap();
        assert_eq!(result.products.len(), 1);

        let err = service.search("  ").await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
    }
}
