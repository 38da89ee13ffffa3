//! `VMart` storefront library.
//!
//! Client-side state for a demo retail storefront: session, cart, wishlist
//! and checkout stores over a durable key-value storage, plus a mock product
//! catalog. Front ends (the `vmart` CLI, tests) drive the stores through
//! [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;
pub mod storage;
