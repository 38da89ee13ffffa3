//! Product catalog access.
//!
//! # Architecture
//!
//! - [`CatalogProvider`] is the read-only interface the storefront consumes.
//!   Every lookup returns an already-materialized list (no pagination cursor)
//!   and is fallible so a real backend can signal failure.
//! - [`MockCatalog`] serves the static demo catalog with simulated latency.
//! - [`CachedCatalog`] wraps any provider with an in-memory `moka` cache.
//! - [`listing`] refines a product list for the category page (price range,
//!   stock and sale filters, sort order).

mod cache;
mod data;
pub mod listing;
mod mock;

pub use cache::{CachedCatalog, DEFAULT_CACHE_TTL};
pub use listing::{ProductFilter, SortOrder};
pub use mock::{CatalogLatency, MockCatalog};

use async_trait::async_trait;
use thiserror::Error;

use vmart_core::ProductId;

use crate::models::{Category, Product};

/// How many products the featured and new shelves show.
pub const SHELF_SIZE: usize = 4;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The backend could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The backend returned data that could not be understood.
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),
}

/// Read-only product catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// All products, optionally truncated to `limit`. A limit of 0 means
    /// no limit.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Product>, CatalogError>;

    /// A single product by ID.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Products in a category (case-insensitive match), optionally truncated.
    async fn list_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, CatalogError>;

    /// Products whose name, description or category contains `query`,
    /// case-insensitively.
    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError>;

    /// Up to [`SHELF_SIZE`] featured products.
    async fn list_featured(&self) -> Result<Vec<Product>, CatalogError>;

    /// Up to [`SHELF_SIZE`] new products.
    async fn list_new(&self) -> Result<Vec<Product>, CatalogError>;

    /// All categories.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
}

/// Products related to `product`: others in the same category, up to `limit`.
///
/// # Errors
///
/// Returns the provider's error if the category lookup fails.
pub async fn related_products(
    catalog: &dyn CatalogProvider,
    product: &Product,
    limit: usize,
) -> Result<Vec<Product>, CatalogError> {
    let products = catalog
        .list_by_category(product.category.as_str(), Some(limit + 1))
        .await?;

    Ok(products
        .into_iter()
        .filter(|p| p.id != product.id)
        .take(limit)
        .collect())
}

/// Apply an optional limit to a materialized list. Zero is treated as unset.
fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit.filter(|&l| l > 0) {
        items.truncate(limit);
    }
    items
}
