//! Checkout commands.
//!
//! `place` runs the whole sequence in one go: shipping form, payment form,
//! simulated payment, confirmation.

use clap::{Args, Subcommand};

use vmart_core::{CheckoutStep, PaymentMethod, ShippingMethod};
use vmart_storefront::error::AppError;
use vmart_storefront::models::{Address, CardInfo};
use vmart_storefront::services::{CheckoutEntry, CheckoutError};
use vmart_storefront::state::AppState;

use super::output;

#[derive(Subcommand)]
pub enum CheckoutAction {
    /// Show order totals for the current cart
    Totals {
        /// `standard` or `express`
        #[arg(long, default_value_t = ShippingMethod::Standard)]
        shipping_method: ShippingMethod,
    },
    /// Place an order for the current cart
    Place(Box<PlaceArgs>),
}

#[derive(Args)]
pub struct PlaceArgs {
    #[command(flatten)]
    shipping: ShippingArgs,

    #[command(flatten)]
    billing: BillingArgs,

    /// `standard` or `express`
    #[arg(long, default_value_t = ShippingMethod::Standard)]
    shipping_method: ShippingMethod,

    /// `credit` or `paypal`
    #[arg(long, default_value_t = PaymentMethod::Credit)]
    payment: PaymentMethod,

    #[command(flatten)]
    card: CardArgs,
}

#[derive(Args)]
struct ShippingArgs {
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    postal_code: String,
    #[arg(long, default_value = "")]
    country: String,
}

impl From<ShippingArgs> for Address {
    fn from(args: ShippingArgs) -> Self {
        Self {
            full_name: args.full_name,
            phone: args.phone,
            address: args.address,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
        }
    }
}

/// Billing address. Any billing flag turns off "same as shipping".
#[derive(Args)]
struct BillingArgs {
    #[arg(long)]
    billing_full_name: Option<String>,
    #[arg(long)]
    billing_address: Option<String>,
    #[arg(long)]
    billing_city: Option<String>,
    #[arg(long)]
    billing_state: Option<String>,
    #[arg(long)]
    billing_postal_code: Option<String>,
    #[arg(long)]
    billing_country: Option<String>,
}

impl BillingArgs {
    fn into_address(self) -> Option<Address> {
        let fields = [
            &self.billing_full_name,
            &self.billing_address,
            &self.billing_city,
            &self.billing_state,
            &self.billing_postal_code,
            &self.billing_country,
        ];
        if fields.iter().all(|field| field.is_none()) {
            return None;
        }

        Some(Address {
            full_name: self.billing_full_name.unwrap_or_default(),
            phone: String::new(),
            address: self.billing_address.unwrap_or_default(),
            city: self.billing_city.unwrap_or_default(),
            state: self.billing_state.unwrap_or_default(),
            postal_code: self.billing_postal_code.unwrap_or_default(),
            country: self.billing_country.unwrap_or_default(),
        })
    }
}

#[derive(Args)]
struct CardArgs {
    #[arg(long, default_value = "")]
    card_number: String,
    #[arg(long, default_value = "")]
    name_on_card: String,
    /// `MM/YY`
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvv: String,
}

impl From<CardArgs> for CardInfo {
    fn from(args: CardArgs) -> Self {
        Self {
            card_number: args.card_number,
            name_on_card: args.name_on_card,
            expiry: args.expiry,
            cvv: args.cvv,
        }
    }
}

/// Run a checkout subcommand.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when logged out, `AppError::BadRequest`
/// for an empty cart, and `AppError::Checkout` when a form is incomplete.
pub async fn run(state: &AppState, action: CheckoutAction) -> Result<(), AppError> {
    match state.checkout_entry(CheckoutStep::Shipping) {
        CheckoutEntry::Proceed => {}
        CheckoutEntry::RedirectToLogin { return_to } => {
            return Err(AppError::Unauthorized(format!(
                "log in to continue to {return_to}"
            )));
        }
        CheckoutEntry::RedirectToCart => {
            return Err(AppError::BadRequest("your cart is empty".to_string()));
        }
    }

    match action {
        CheckoutAction::Totals { shipping_method } => {
            let mut checkout = state.new_checkout();
            checkout.set_shipping_method(shipping_method)?;
            output::totals(&checkout.totals(state.cart()));
            Ok(())
        }
        CheckoutAction::Place(args) => place(state, *args).await,
    }
}

async fn place(state: &AppState, args: PlaceArgs) -> Result<(), AppError> {
    let mut checkout = state.new_checkout();

    checkout.set_shipping_address(args.shipping.into())?;
    checkout.set_shipping_method(args.shipping_method)?;
    if let Some(billing) = args.billing.into_address() {
        checkout.set_same_as_shipping(false)?;
        checkout.set_billing_address(billing)?;
    }
    checkout.submit_shipping()?;

    checkout.set_payment_method(args.payment)?;
    if args.payment == PaymentMethod::Credit {
        checkout.set_card(args.card.into())?;
    }

    tracing::info!("Processing payment");
    checkout.submit_payment().await?;

    let order = checkout.complete(state.cart()).map_err(|checkout| {
        AppError::Checkout(CheckoutError::InvalidTransition {
            action: "complete the order",
            step: checkout.step(),
        })
    })?;

    output::order(&order);
    Ok(())
}
