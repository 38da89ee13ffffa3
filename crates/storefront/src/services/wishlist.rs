//! Wishlist store.
//!
//! Product snapshots saved for later, persisted under [`keys::WISHLIST`]. The
//! wishlist belongs to the logged-in user and is cleared on logout.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use vmart_core::ProductId;

use super::cart::CartStore;
use super::session::{SessionEvent, SessionListener};
use crate::models::{CartItem, Product};
use crate::notify::Notifier;
use crate::storage::{KeyValueStorage, keys, load_json, remove_key, save_json};

/// Saved products, unique by product ID.
pub struct WishlistStore {
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
    entries: RwLock<Vec<Product>>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Create a wishlist, restoring persisted entries.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let mut entries: Vec<Product> =
            load_json(storage.as_ref(), keys::WISHLIST).unwrap_or_default();

        let before = entries.len();
        let mut seen = HashSet::new();
        entries.retain(|p| seen.insert(p.id.clone()));
        if entries.len() != before {
            warn!(
                dropped = before - entries.len(),
                "persisted wishlist had duplicate products"
            );
        }

        Self {
            storage,
            notifier,
            entries: RwLock::new(entries),
        }
    }

    /// Save `product`. Returns `false` if it was already saved.
    pub fn add(&self, product: Product) -> bool {
        let added = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            if entries.iter().any(|p| p.id == product.id) {
                false
            } else {
                entries.push(product);
                save_json(self.storage.as_ref(), keys::WISHLIST, entries.as_slice());
                true
            }
        };

        if added {
            self.notifier.success("Product added to wishlist");
        } else {
            self.notifier.error("Product already in wishlist");
        }
        added
    }

    /// Remove the entry for `id`.
    pub fn remove(&self, id: &ProductId) {
        {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.retain(|p| &p.id != id);
            save_json(self.storage.as_ref(), keys::WISHLIST, entries.as_slice());
        }
        self.notifier.success("Item removed from wishlist");
    }

    /// Add one saved product to the cart. Returns `false` if `id` is not saved.
    pub fn add_to_cart(&self, id: &ProductId, cart: &CartStore) -> bool {
        let item = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| &p.id == id)
            .map(CartItem::from);

        match item {
            Some(item) => {
                cart.add_to_cart(item);
                true
            }
            None => false,
        }
    }

    /// Add every saved product to the cart, in wishlist order.
    pub fn add_all_to_cart(&self, cart: &CartStore) {
        let items: Vec<CartItem> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(CartItem::from)
            .collect();

        for item in items {
            cart.add_to_cart(item);
        }
        self.notifier.success("All items added to cart");
    }

    /// Snapshot of saved products, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Product> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        remove_key(self.storage.as_ref(), keys::WISHLIST);
    }
}

impl SessionListener for WishlistStore {
    fn on_session_event(&self, event: &SessionEvent) {
        if matches!(event, SessionEvent::Ended) {
            info!("session ended; clearing wishlist");
            self.clear();
        }
    }
}
