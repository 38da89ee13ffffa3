//! Type-safe price representation using decimal arithmetic.
//!
//! All storefront prices are US dollars. Amounts are kept as exact decimals so
//! that cart totals such as `2 × 399.99` come out as `799.98` rather than a
//! binary floating point approximation.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in US dollars.
///
/// Serialized transparently as the decimal amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal dollar amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    ///
    /// ```
    /// use vmart_core::Price;
    ///
    /// assert_eq!(Price::from_cents(39_999).to_string(), "$399.99");
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // splitting into 32-bit words
    pub const fn from_cents(cents: i64) -> Self {
        let magnitude = cents.unsigned_abs();
        Self(Decimal::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            0,
            cents < 0,
            2,
        ))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a decimal factor (e.g. a tax rate).
    #[must_use]
    pub fn scale(self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// Round to whole cents, halves away from zero.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("${:.2}", self.round_to_cents().0))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(499).amount(), Decimal::new(499, 2));
        assert_eq!(Price::from_cents(0), Price::ZERO);
        assert_eq!(Price::from_cents(-150).amount(), Decimal::new(-150, 2));
    }

    #[test]
    fn test_from_cents_in_const_context() {
        const FEE: Price = Price::from_cents(1_299);
        const REFUND: Price = Price::from_cents(-250);
        const LARGE: Price = Price::from_cents(i64::MAX);
        const MIN: Price = Price::from_cents(i64::MIN);

        assert_eq!(FEE.amount(), Decimal::new(1_299, 2));
        assert_eq!(REFUND.amount(), Decimal::new(-250, 2));
        assert_eq!(LARGE.amount(), Decimal::new(i64::MAX, 2));
        assert_eq!(MIN.amount(), Decimal::new(i64::MIN, 2));
    }

    #[test]
    fn test_multiplication_is_exact() {
        let total = Price::from_cents(39_999) * 2;
        assert_eq!(total, Price::from_cents(79_998));
        assert_eq!(total.to_string(), "$799.98");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(1_999), Price::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2_000));
    }

    #[test]
    fn test_scale_and_round() {
        // 30.00 * 0.07 = 2.10
        let tax = Price::from_cents(3_000).scale(Decimal::new(7, 2));
        assert_eq!(tax.round_to_cents(), Price::from_cents(210));
    }

    #[test]
    fn test_display_rounds_half_up() {
        // 799.98 * 0.07 = 55.9986
        let tax = Price::from_cents(79_998).scale(Decimal::new(7, 2));
        assert_eq!(tax.to_string(), "$56.00");
        assert_eq!(Price::new(Decimal::new(12_345, 3)).to_string(), "$12.35");
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::new(Decimal::new(5, 0)).to_string(), "$5.00");
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let price = Price::from_cents(39_999);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"399.99\"");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
