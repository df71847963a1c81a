//! Read-only catalog access.
//!
//! A catalog file is a JSON array of [`CatalogItem`] records. The store only
//! reads it; status labels and price history are taken as written.

use async_trait::async_trait;
use laptoptimus_core::{CatalogItem, ListingStatus};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::persistence::load_json;

/// Source of catalog records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns every record, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded.
    async fn items(&self) -> Result<Vec<CatalogItem>, StoreError>;

    /// Returns the records carrying `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded.
    async fn items_with_status(&self, status: ListingStatus) -> Result<Vec<CatalogItem>, StoreError> {
        let mut items = self.items().await?;
        items.retain(|item| item.status == status);
        Ok(items)
    }
}

/// Catalog backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    /// Creates a catalog reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn items(&self) -> Result<Vec<CatalogItem>, StoreError> {
        let items: Vec<CatalogItem> = load_json(&self.path).await?;
        debug!(count = items.len(), "Catalog loaded");
        Ok(items)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use laptoptimus_core::Currency;
    use tempfile::TempDir;

    const CATALOG: &str = r#"[
        {
            "id": "1",
            "modelName": "ASUS ROG Strix G16",
            "specs": { "cpu": "i7-13650HX", "ram": "16GB", "storage": "1TB", "gpu": "RTX 4060", "screen": "16\"" },
            "priceOriginal": 6499,
            "currency": "RON",
            "storeName": "eMAG.ro",
            "country": "RO",
            "link": "https://www.emag.ro/",
            "status": "updated",
            "lastChecked": "10 min ago",
            "priceHistory": [{ "date": "27.05", "price": 6799 }, { "date": "28.05", "price": 6499 }]
        },
        {
            "id": "2",
            "modelName": "Lenovo Legion 5",
            "priceOriginal": 52999,
            "currency": "UAH",
            "storeName": "Rozetka",
            "country": "UA",
            "status": "new",
            "inStock": false
        },
        {
            "id": "3",
            "modelName": "HP Victus 16",
            "priceOriginal": 4200,
            "currency": "RON",
            "storeName": "Altex",
            "country": "RO",
            "status": "stable"
        }
    ]"#;

    async fn write_catalog(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("catalog.json");
        tokio::fs::write(&path, body).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = JsonCatalog::new(write_catalog(&dir, CATALOG).await);

        let items = catalog.items().await.unwrap();
        assert_eq!(items.len(), 3);

        let strix = &items[0];
        assert_eq!(strix.listing.id, "1");
        assert_eq!(strix.listing.currency, Currency::Ron);
        assert_eq!(strix.status, ListingStatus::Updated);
        assert_eq!(strix.price_history.len(), 2);
        assert_eq!(strix.badge(), "price changed");

        assert_eq!(items[1].badge(), "out of stock");
        assert!(items[2].in_stock);
    }

    #[tokio::test]
    async fn test_filter_by_status() {
        let dir = TempDir::new().unwrap();
        let catalog = JsonCatalog::new(write_catalog(&dir, CATALOG).await);

        let fresh = catalog.items_with_status(ListingStatus::New).await.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].listing.model_name, "Lenovo Legion 5");

        let deleted = catalog.items_with_status(ListingStatus::Deleted).await.unwrap();
        assert!(deleted.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(&dir, r#"[{"id": "1", "status": "archived"}]"#).await;

        let result = JsonCatalog::new(path).items().await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = JsonCatalog::new(dir.path().join("absent.json")).items().await;
        assert!(result.unwrap_err().is_not_found());
    }
}
