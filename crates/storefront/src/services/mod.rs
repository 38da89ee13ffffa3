//! Storefront state stores.
//!
//! # Services
//!
//! - `session` - Current user, login/registration, session events
//! - `cart` - Line items, counts and totals
//! - `wishlist` - Saved products, cleared on logout
//! - `checkout` - Shipping → payment → confirmation sequencer and pricing
//!
//! Stores are constructed with a [`crate::storage::KeyValueStorage`] and a
//! [`crate::notify::Notifier`], take `&self` for every operation, and are
//! meant to be shared behind an `Arc`.

pub mod cart;
pub mod checkout;
pub mod session;
pub mod wishlist;

pub use cart::CartStore;
pub use checkout::{CheckoutEntry, CheckoutError, CheckoutSequencer, CompletedOrder, checkout_entry};
pub use session::{CredentialDirectory, SessionError, SessionEvent, SessionListener, SessionStore};
pub use wishlist::WishlistStore;
