//! Shopping cart commands.

use clap::Subcommand;

use vmart_core::ProductId;
use vmart_storefront::error::AppError;
use vmart_storefront::models::CartItem;
use vmart_storefront::state::AppState;

use super::{find_product, output};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove { id: String },
    /// Set a product's quantity; zero or less removes it
    Update {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

/// Run a cart subcommand.
///
/// # Errors
///
/// Returns `AppError::NotFound` when adding an unknown product.
pub async fn run(state: &AppState, action: CartAction) -> Result<(), AppError> {
    let cart = state.cart();

    match action {
        CartAction::Show => {}
        CartAction::Add { id, quantity } => {
            if quantity == 0 {
                return Err(AppError::BadRequest("quantity must be at least 1".into()));
            }
            let product = find_product(state, &id).await?;
            cart.add_to_cart_quantity(&CartItem::from(&product), quantity);
        }
        CartAction::Remove { id } => cart.remove_from_cart(&ProductId::new(id)),
        CartAction::Update { id, quantity } => cart.update_quantity(&ProductId::new(id), quantity),
        CartAction::Clear => cart.clear_cart(),
    }

    output::cart(&cart.items(), cart.item_count(), cart.cart_total());
    Ok(())
}
