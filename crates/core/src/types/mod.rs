//! Core types for VMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod checkout;
pub mod email;
pub mod id;
pub mod price;
pub mod role;

pub use checkout::{CheckoutStep, ParseChoiceError, PaymentMethod, ShippingMethod};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use role::UserRole;
