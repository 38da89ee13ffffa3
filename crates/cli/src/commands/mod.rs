//! Subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod output;
pub mod session;
pub mod wishlist;

pub use cart::CartAction;
pub use catalog::CatalogAction;
pub use checkout::CheckoutAction;
pub use wishlist::WishlistAction;

use vmart_core::ProductId;
use vmart_storefront::error::AppError;
use vmart_storefront::models::Product;
use vmart_storefront::state::AppState;

/// Look up a product or fail with `AppError::NotFound`.
async fn find_product(state: &AppState, id: &str) -> Result<Product, AppError> {
    state
        .catalog()
        .get_by_id(&ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
