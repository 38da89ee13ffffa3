//! Category page filtering and sorting.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use vmart_core::{ParseChoiceError, Price};

use crate::models::Product;

/// Filters applied to a category listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductFilter {
    /// Inclusive lower price bound.
    pub min_price: Price,
    /// Inclusive upper price bound.
    pub max_price: Price,
    pub in_stock_only: bool,
    pub on_sale_only: bool,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            min_price: Price::ZERO,
            max_price: Price::from_cents(100_000),
            in_stock_only: false,
            on_sale_only: false,
        }
    }
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if product.price < self.min_price || product.price > self.max_price {
            return false;
        }
        if self.in_stock_only && !product.in_stock() {
            return false;
        }
        !(self.on_sale_only && !product.is_on_sale())
    }
}

/// Sort order for a category listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Featured products first.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// New arrivals first.
    Newest,
    /// Highest rated first.
    Rating,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => b.featured.cmp(&a.featured),
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Newest => b.new.cmp(&a.new),
            Self::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Featured => write!(f, "featured"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::Newest => write!(f, "newest"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" | "priceLow" => Ok(Self::PriceLow),
            "price-high" | "priceHigh" => Ok(Self::PriceHigh),
            "newest" => Ok(Self::Newest),
            "rating" => Ok(Self::Rating),
            _ => Err(ParseChoiceError::new("sort order", s)),
        }
    }
}

/// Filter `products` and sort what remains. Ties keep their catalog order.
#[must_use]
pub fn refine(products: Vec<Product>, filter: &ProductFilter, sort: SortOrder) -> Vec<Product> {
    let mut products: Vec<Product> = products
        .into_iter()
        .filter(|p| filter.matches(p))
        .collect();
    products.sort_by(|a, b| sort.compare(a, b));
    products
}
