//! Catalog browsing commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use vmart_core::Price;
use vmart_storefront::catalog::{ProductFilter, SortOrder, listing, related_products};
use vmart_storefront::error::AppError;
use vmart_storefront::state::AppState;

use super::{find_product, output};

/// Number of related products shown under a product.
const RELATED_LIMIT: usize = 4;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all products
    List {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one product and related products
    Show {
        /// Product ID (e.g. `product-1`)
        id: String,
    },
    /// List a category with filters and sorting
    Category {
        /// Category ID (e.g. `electronics`)
        id: String,

        /// `featured`, `price-low`, `price-high`, `newest` or `rating`
        #[arg(short, long, default_value_t = SortOrder::Featured)]
        sort: SortOrder,

        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,

        /// Only products with stock
        #[arg(long)]
        in_stock: bool,

        /// Only discounted products
        #[arg(long)]
        on_sale: bool,
    },
    /// Search names, descriptions and categories
    Search { query: String },
    /// Featured products
    Featured,
    /// New arrivals
    New,
    /// List categories
    Categories,
}

/// Run a catalog subcommand.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product, or the catalog's
/// error if a lookup fails.
pub async fn run(state: &AppState, action: CatalogAction) -> Result<(), AppError> {
    let catalog = state.catalog();

    match action {
        CatalogAction::List { limit } => output::products(&catalog.list(limit).await?),
        CatalogAction::Show { id } => {
            let product = find_product(state, &id).await?;
            output::product(&product);

            let related = related_products(catalog, &product, RELATED_LIMIT).await?;
            if !related.is_empty() {
                output::line("\nYou may also like:");
                output::products(&related);
            }
        }
        CatalogAction::Category {
            id,
            sort,
            min_price,
            max_price,
            in_stock,
            on_sale,
        } => {
            let defaults = ProductFilter::default();
            let filter = ProductFilter {
                min_price: min_price.map_or(defaults.min_price, Price::new),
                max_price: max_price.map_or(defaults.max_price, Price::new),
                in_stock_only: in_stock,
                on_sale_only: on_sale,
            };

            let products = catalog.list_by_category(&id, None).await?;
            output::products(&listing::refine(products, &filter, sort));
        }
        CatalogAction::Search { query } => output::products(&catalog.search(&query).await?),
        CatalogAction::Featured => output::products(&catalog.list_featured().await?),
        CatalogAction::New => output::products(&catalog.list_new().await?),
        CatalogAction::Categories => output::categories(&catalog.list_categories().await?),
    }

    Ok(())
}
