//! Domain models for the storefront.
//!
//! These types are the persisted and exchanged shapes; behaviour lives in the
//! stores under [`crate::services`].

pub mod cart;
pub mod checkout;
pub mod product;
pub mod user;

pub use cart::{CartItem, CartLineItem};
pub use checkout::{Address, CardInfo, OrderTotals};
pub use product::{Category, Product};
pub use user::{Credential, User};
