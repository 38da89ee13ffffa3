//! VMart Core - Shared types library.
//!
//! This crate provides common types used across all VMart components:
//! - `storefront` - Session, cart, wishlist and checkout state stores
//! - `cli` - Command-line driver for the storefront stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and
//!   checkout choices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
