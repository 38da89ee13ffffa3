//! In-memory catalog with simulated network latency.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use vmart_core::ProductId;

use super::{CatalogError, CatalogProvider, SHELF_SIZE, data, truncate};
use crate::models::{Category, Product};

/// Simulated latency per catalog operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLatency {
    /// Full listing, category, featured and new lookups.
    pub listing: Duration,
    /// Single-product and category list lookups.
    pub lookup: Duration,
    pub search: Duration,
}

impl CatalogLatency {
    /// Same delay for every operation.
    #[must_use]
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            listing: delay,
            lookup: delay,
            search: delay,
        }
    }
}

impl Default for CatalogLatency {
    fn default() -> Self {
        Self {
            listing: Duration::from_millis(800),
            lookup: Duration::from_millis(500),
            search: Duration::from_millis(1000),
        }
    }
}

/// Serves the static demo catalog.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    latency: CatalogLatency,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::with_latency(CatalogLatency::default())
    }
}

impl MockCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_latency(latency: CatalogLatency) -> Self {
        Self {
            products: data::products(),
            categories: data::categories(),
            latency,
        }
    }

    /// No simulated delay. Used by tests and scripted runs.
    #[must_use]
    pub fn instant() -> Self {
        Self::with_latency(CatalogLatency::uniform(Duration::ZERO))
    }

    async fn delay(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    fn matching(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogProvider for MockCatalog {
    #[instrument(skip(self))]
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Product>, CatalogError> {
        Self::delay(self.latency.listing).await;
        Ok(truncate(self.products.clone(), limit))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Self::delay(self.latency.lookup).await;
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, CatalogError> {
        Self::delay(self.latency.listing).await;
        let products = self.matching(|p| p.category.as_str().eq_ignore_ascii_case(category));
        Ok(truncate(products, limit))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        Self::delay(self.latency.search).await;
        let needle = query.to_lowercase();
        Ok(self.matching(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.category.as_str().to_lowercase().contains(&needle)
        }))
    }

    #[instrument(skip(self))]
    async fn list_featured(&self) -> Result<Vec<Product>, CatalogError> {
        Self::delay(self.latency.listing).await;
        Ok(truncate(self.matching(|p| p.featured), Some(SHELF_SIZE)))
    }

    #[instrument(skip(self))]
    async fn list_new(&self) -> Result<Vec<Product>, CatalogError> {
        Self::delay(self.latency.listing).await;
        Ok(truncate(self.matching(|p| p.new), Some(SHELF_SIZE)))
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Self::delay(self.latency.lookup).await;
        Ok(self.categories.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_returns_whole_catalog() {
        let catalog = MockCatalog::instant();
        assert_eq!(catalog.list(None).await.unwrap().len(), 8);
        assert_eq!(catalog.list(Some(3)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_zero_limit_means_unlimited() {
        let catalog = MockCatalog::instant();
        assert_eq!(catalog.list(Some(0)).await.unwrap().len(), 8);
        assert_eq!(
            catalog.list_by_category("Electronics", Some(0)).await.unwrap(),
            catalog.list_by_category("Electronics", None).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let catalog = MockCatalog::instant();
        let tv = catalog
            .get_by_id(&ProductId::new("product-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tv.name, "Smart HD TV 43\"");
        assert!(tv.is_on_sale());

        let missing = catalog
            .get_by_id(&ProductId::new("product-99"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_category_match_ignores_case() {
        let catalog = MockCatalog::instant();
        let products = catalog.list_by_category("Electronics", None).await.unwrap();
        assert_eq!(ids(&products), vec!["product-1", "product-2", "product-3"]);

        let empty = catalog.list_by_category("toys", None).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_search_covers_name_description_and_category() {
        let catalog = MockCatalog::instant();

        let by_name = catalog.search("COFFEE").await.unwrap();
        assert_eq!(ids(&by_name), vec!["product-6"]);

        let by_description = catalog.search("noise cancellation").await.unwrap();
        assert_eq!(ids(&by_description), vec!["product-2"]);

        let by_category = catalog.search("beauty").await.unwrap();
        assert_eq!(ids(&by_category), vec!["product-8"]);

        assert!(catalog.search("zzz-nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_shelves() {
        let catalog = MockCatalog::instant();
        let featured = catalog.list_featured().await.unwrap();
        assert_eq!(
            ids(&featured),
            vec!["product-1", "product-2", "product-5", "product-8"]
        );

        let new = catalog.list_new().await.unwrap();
        assert_eq!(ids(&new), vec!["product-3", "product-7"]);
    }

    #[tokio::test]
    async fn test_categories() {
        let catalog = MockCatalog::instant();
        let categories = catalog.list_categories().await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[2].name, "Home & Kitchen");
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_waits_for_latency() {
        let catalog = MockCatalog::new();
        let started = tokio::time::Instant::now();
        catalog.list_categories().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
