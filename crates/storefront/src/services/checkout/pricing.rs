//! Order pricing.
//!
//! Pure functions of the cart subtotal and shipping method. Amounts are exact;
//! rounding to cents happens only when a [`Price`] is displayed.

use rust_decimal::Decimal;

use vmart_core::{Price, ShippingMethod};

use crate::models::OrderTotals;

/// Flat rate for express shipping.
pub const EXPRESS_SHIPPING: Price = Price::from_cents(1_299);

/// Standard shipping for orders at or below [`FREE_SHIPPING_THRESHOLD`].
pub const STANDARD_SHIPPING: Price = Price::from_cents(499);

/// Standard shipping is free for subtotals strictly above this amount.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::from_cents(5_000);

/// Sales tax rate (7%).
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Shipping cost for `subtotal` under `method`.
#[must_use]
pub fn shipping_cost(subtotal: Price, method: ShippingMethod) -> Price {
    match method {
        ShippingMethod::Express => EXPRESS_SHIPPING,
        ShippingMethod::Standard if subtotal > FREE_SHIPPING_THRESHOLD => Price::ZERO,
        ShippingMethod::Standard => STANDARD_SHIPPING,
    }
}

/// Sales tax on `subtotal`. Shipping is not taxed.
#[must_use]
pub fn tax_amount(subtotal: Price) -> Price {
    subtotal.scale(TAX_RATE)
}

/// Subtotal, shipping, tax and grand total.
#[must_use]
pub fn order_totals(subtotal: Price, method: ShippingMethod) -> OrderTotals {
    let shipping = shipping_cost(subtotal, method);
    let tax = tax_amount(subtotal);

    OrderTotals {
        subtotal,
        shipping,
        tax,
        total: subtotal + shipping + tax,
    }
}
