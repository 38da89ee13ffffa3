//! Wishlist commands.

use clap::Subcommand;

use vmart_core::ProductId;
use vmart_storefront::error::AppError;
use vmart_storefront::state::AppState;

use super::{find_product, output};

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product
    Add { id: String },
    /// Remove a saved product
    Remove { id: String },
    /// Move one saved product into the cart
    AddToCart { id: String },
    /// Add every saved product to the cart
    AddAll,
}

/// Run a wishlist subcommand.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown or unsaved product.
pub async fn run(state: &AppState, action: WishlistAction) -> Result<(), AppError> {
    let wishlist = state.wishlist();

    match action {
        WishlistAction::Show => output::products(&wishlist.entries()),
        WishlistAction::Add { id } => {
            let product = find_product(state, &id).await?;
            wishlist.add(product);
            output::products(&wishlist.entries());
        }
        WishlistAction::Remove { id } => {
            wishlist.remove(&ProductId::new(id));
            output::products(&wishlist.entries());
        }
        WishlistAction::AddToCart { id } => {
            if !wishlist.add_to_cart(&ProductId::new(id.as_str()), state.cart()) {
                return Err(AppError::NotFound(format!("{id} in wishlist")));
            }
            let cart = state.cart();
            output::cart(&cart.items(), cart.item_count(), cart.cart_total());
        }
        WishlistAction::AddAll => {
            wishlist.add_all_to_cart(state.cart());
            let cart = state.cart();
            output::cart(&cart.items(), cart.item_count(), cart.cart_total());
        }
    }

    Ok(())
}
