//! Cart store.
//!
//! An ordered list of line items, one per product, persisted in full under
//! [`keys::CART`] after every mutation. Counts and totals are recomputed on
//! every read.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::{debug, warn};

use vmart_core::{Price, ProductId};

use crate::error::add_breadcrumb;
use crate::models::{CartItem, CartLineItem};
use crate::notify::Notifier;
use crate::storage::{KeyValueStorage, keys, load_json, save_json};

/// The shopping cart.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
    lines: RwLock<Vec<CartLineItem>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.items())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a cart, restoring persisted lines.
    ///
    /// Persisted data that is malformed, has a quantity below 1, or repeats a
    /// product is discarded and the cart starts empty.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let lines = load_json::<Vec<CartLineItem>>(storage.as_ref(), keys::CART)
            .and_then(|lines| {
                if lines_are_valid(&lines) {
                    Some(lines)
                } else {
                    warn!("persisted cart violates line invariants; starting empty");
                    None
                }
            })
            .unwrap_or_default();

        debug!(lines = lines.len(), "cart loaded");

        Self {
            storage,
            notifier,
            lines: RwLock::new(lines),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `item`.
    ///
    /// An existing line for the same product is incremented; otherwise a new
    /// line is appended at quantity 1.
    pub fn add_to_cart(&self, item: CartItem) {
        let product_id = item.product_id.clone();
        let message = {
            let mut lines = self.write();
            let message = match lines.iter_mut().find(|l| l.product_id == item.product_id) {
                Some(line) => {
                    line.quantity = line.quantity.saturating_add(1);
                    format!("{} quantity updated in cart", item.name)
                }
                None => {
                    let message = format!("{} added to cart", item.name);
                    lines.push(CartLineItem::new(item));
                    message
                }
            };
            self.persist(&lines);
            message
        };

        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
        self.notifier.success(&message);
    }

    /// Add `quantity` units of `item`, one at a time.
    pub fn add_to_cart_quantity(&self, item: &CartItem, quantity: u32) {
        for _ in 0..quantity {
            self.add_to_cart(item.clone());
        }
    }

    /// Remove the line for `id`. Removing an absent product does nothing.
    pub fn remove_from_cart(&self, id: &ProductId) {
        let removed = {
            let mut lines = self.write();
            let position = lines.iter().position(|l| &l.product_id == id);
            let removed = position.map(|index| lines.remove(index));
            self.persist(&lines);
            removed
        };

        if let Some(line) = removed {
            add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
            self.notifier
                .info(&format!("{} removed from cart", line.name));
        }
    }

    /// Set the quantity for `id`. A quantity below 1 removes the line.
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove_from_cart(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut lines = self.write();
        if let Some(line) = lines.iter_mut().find(|l| &l.product_id == id) {
            line.quantity = quantity;
        }
        self.persist(&lines);
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        {
            let mut lines = self.write();
            lines.clear();
            self.persist(&lines);
        }
        add_breadcrumb("cart", "Cleared cart", None);
        self.notifier.info("Cart cleared");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Snapshot of the current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.read().clone()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.read().iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of every line total.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.read().iter().map(CartLineItem::line_total).sum()
    }

    /// Quantity of `id` in the cart, or 0.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.read()
            .iter()
            .find(|l| &l.product_id == id)
            .map_or(0, |l| l.quantity)
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<CartLineItem>> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CartLineItem>> {
        self.lines.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, lines: &[CartLineItem]) {
        save_json(self.storage.as_ref(), keys::CART, lines);
    }
}

fn lines_are_valid(lines: &[CartLineItem]) -> bool {
    let mut seen = HashSet::new();
    lines
        .iter()
        .all(|line| line.quantity >= 1 && seen.insert(&line.product_id))
}
