//! Cart line item types.

use serde::{Deserialize, Serialize};

use vmart_core::{Price, ProductId};

use super::Product;

/// What gets added to the cart: a product reference without a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.primary_image().unwrap_or_default().to_owned(),
        }
    }
}

/// One product in the cart at a given quantity.
///
/// Persisted as a JSON array under [`crate::storage::keys::CART`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Start a new line at quantity 1.
    #[must_use]
    pub fn new(item: CartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            unit_price: item.unit_price,
            image: item.image,
            quantity: 1,
        }
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let mut line = CartLineItem::new(CartItem {
            product_id: ProductId::new("product-4"),
            name: "Casual Men's T-Shirt".to_string(),
            unit_price: Price::from_cents(1_999),
            image: String::new(),
        });
        assert_eq!(line.quantity, 1);

        line.quantity = 3;
        assert_eq!(line.line_total(), Price::from_cents(5_997));
    }
}
