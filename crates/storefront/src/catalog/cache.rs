//! Caching decorator for catalog providers.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};

use vmart_core::ProductId;

use super::{CatalogError, CatalogProvider};
use crate::models::{Category, Product};

/// Default time-to-live for cached catalog responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    All { limit: Option<usize> },
    Product(ProductId),
    Category { slug: String, limit: Option<usize> },
    Featured,
    New,
    Categories,
}

#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
}

/// Wraps a [`CatalogProvider`] and caches its responses in memory.
///
/// Search results and missing products are not cached.
pub struct CachedCatalog<P> {
    inner: P,
    cache: Cache<CacheKey, CacheValue>,
}

impl<P: CatalogProvider> CachedCatalog<P> {
    /// Cache with the default 5 minute TTL.
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    #[must_use]
    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    async fn cached_products<F>(&self, key: CacheKey, fetch: F) -> Result<Vec<Product>, CatalogError>
    where
        F: Future<Output = Result<Vec<Product>, CatalogError>> + Send,
    {
        if let Some(CacheValue::Products(products)) = self.cache.get(&key).await {
            debug!(?key, "Cache hit for products");
            return Ok(products);
        }

        let products = fetch.await?;
        self.cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }
}

#[async_trait]
impl<P: CatalogProvider> CatalogProvider for CachedCatalog<P> {
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Product>, CatalogError> {
        self.cached_products(CacheKey::All { limit }, self.inner.list(limit))
            .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let key = CacheKey::Product(id.clone());

        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let product = self.inner.get_by_id(id).await?;
        if let Some(product) = &product {
            self.cache
                .insert(key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }
        Ok(product)
    }

    async fn list_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::Category {
            slug: category.to_lowercase(),
            limit,
        };
        self.cached_products(key, self.inner.list_by_category(category, limit))
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        self.inner.search(query).await
    }

    async fn list_featured(&self) -> Result<Vec<Product>, CatalogError> {
        self.cached_products(CacheKey::Featured, self.inner.list_featured())
            .await
    }

    async fn list_new(&self) -> Result<Vec<Product>, CatalogError> {
        self.cached_products(CacheKey::New, self.inner.list_new())
            .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = self.inner.list_categories().await?;
        self.cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }
}
