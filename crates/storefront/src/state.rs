//! Application state shared across front ends.

use std::sync::Arc;

use vmart_core::CheckoutStep;

use crate::catalog::{CachedCatalog, CatalogProvider, MockCatalog};
use crate::config::StorefrontConfig;
use crate::notify::{Notifier, TracingNotifier};
use crate::services::{
    CartStore, CheckoutEntry, CheckoutSequencer, SessionListener, SessionStore, WishlistStore,
    checkout_entry,
};
use crate::storage::{FileStorage, KeyValueStorage};

/// Application state shared across all commands.
///
/// This struct is cheaply cloneable via `Arc` and owns every store, wired
/// together: the wishlist listens to the session so logout clears it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    notifier: Arc<dyn Notifier>,
    session: Arc<SessionStore>,
    cart: Arc<CartStore>,
    wishlist: Arc<WishlistStore>,
    catalog: Arc<dyn CatalogProvider>,
}

impl AppState {
    /// Create application state over the given storage and notifier.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `storage` - Backend for persisted store state
    /// * `notifier` - Sink for user-facing notifications
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = Arc::new(
            SessionStore::new(storage.clone(), notifier.clone()).with_latency(config.auth_latency),
        );
        let cart = Arc::new(CartStore::new(storage.clone(), notifier.clone()));
        let wishlist = Arc::new(WishlistStore::new(storage, notifier.clone()));
        session.subscribe(wishlist.clone());

        let catalog: Arc<dyn CatalogProvider> = Arc::new(CachedCatalog::with_ttl(
            MockCatalog::with_latency(config.catalog_latency),
            config.catalog_cache_ttl,
        ));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                notifier,
                session,
                cart,
                wishlist,
                catalog,
            }),
        }
    }

    /// Create application state persisting to `config.storage_dir`, with
    /// notifications written to the log.
    #[must_use]
    pub fn from_config(config: StorefrontConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::new(config, storage, Arc::new(TracingNotifier))
    }

    /// Register an additional session listener.
    pub fn subscribe(&self, listener: Arc<dyn SessionListener>) {
        self.inner.session.subscribe(listener);
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.inner.notifier
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Get a reference to the (cached) product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.inner.catalog.as_ref()
    }

    /// Start a new checkout using the configured payment delay.
    #[must_use]
    pub fn new_checkout(&self) -> CheckoutSequencer {
        CheckoutSequencer::new(self.inner.notifier.clone())
            .with_payment_delay(self.inner.config.payment_delay)
    }

    /// Decide whether checkout can be shown at `step`.
    #[must_use]
    pub fn checkout_entry(&self, step: CheckoutStep) -> CheckoutEntry {
        checkout_entry(&self.inner.session, &self.inner.cart, step)
    }
}
