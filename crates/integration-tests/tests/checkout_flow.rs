//! Cart to confirmation, across the session, cart and checkout stores.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use vmart_core::{CheckoutStep, PaymentMethod, Price, ShippingMethod};
use vmart_integration_tests::{TestContext, sample_address, sample_card};
use vmart_storefront::services::{CheckoutEntry, CheckoutError};
use vmart_storefront::storage::keys;

// =============================================================================
// Cart Totals
// =============================================================================

#[tokio::test]
async fn test_adding_same_product_twice_merges_lines() {
    let ctx = TestContext::new();
    ctx.add_to_cart("product-1", 1).await.unwrap();
    ctx.add_to_cart("product-1", 1).await.unwrap();

    let cart = ctx.state.cart();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.cart_total(), Price::from_cents(79_998));

    let persisted = ctx.persisted(keys::CART).unwrap();
    assert_eq!(persisted[0]["id"], "product-1");
    assert_eq!(persisted[0]["quantity"], 2);
}

#[tokio::test]
async fn test_standard_shipping_charged_below_threshold() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-5", 1).await.unwrap();

    let checkout = ctx.state.new_checkout();
    let totals = checkout.totals(ctx.state.cart());

    assert_eq!(totals.subtotal, Price::from_cents(3_999));
    assert_eq!(totals.shipping, Price::from_cents(499));
    assert!(!totals.free_shipping());
}

#[tokio::test]
async fn test_shipping_above_threshold_depends_on_method() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-4", 1).await.unwrap();
    ctx.add_to_cart("product-5", 1).await.unwrap();

    let mut checkout = ctx.state.new_checkout();
    let standard = checkout.totals(ctx.state.cart());
    assert_eq!(standard.subtotal, Price::from_cents(5_998));
    assert!(standard.free_shipping());
    // 7% of 59.98, unrounded
    assert_eq!(standard.tax, Price::new(Decimal::new(41_986, 4)));
    assert_eq!(standard.total.to_string(), "$64.18");

    checkout
        .set_shipping_method(ShippingMethod::Express)
        .unwrap();
    let express = checkout.totals(ctx.state.cart());
    assert_eq!(express.shipping, Price::from_cents(1_299));
    assert_eq!(express.total.to_string(), "$77.17");
}

// =============================================================================
// Entry Guard
// =============================================================================

#[tokio::test]
async fn test_entry_requires_login_then_items() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.state.checkout_entry(CheckoutStep::Shipping),
        CheckoutEntry::RedirectToLogin {
            return_to: "checkout"
        }
    );

    ctx.login_customer().await.unwrap();
    assert_eq!(
        ctx.state.checkout_entry(CheckoutStep::Shipping),
        CheckoutEntry::RedirectToCart
    );

    ctx.add_to_cart("product-2", 1).await.unwrap();
    assert_eq!(
        ctx.state.checkout_entry(CheckoutStep::Shipping),
        CheckoutEntry::Proceed
    );
}

// =============================================================================
// Full Sequence
// =============================================================================

#[tokio::test]
async fn test_credit_checkout_clears_cart_on_completion() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-1", 2).await.unwrap();
    ctx.add_to_cart("product-6", 1).await.unwrap();

    let mut checkout = ctx.state.new_checkout();
    checkout.set_shipping_address(sample_address()).unwrap();
    checkout.submit_shipping().unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Payment);
    assert_eq!(checkout.billing_address(), &sample_address());

    checkout.set_card(sample_card()).unwrap();
    checkout.submit_payment().await.unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Confirmation);

    let order = checkout.complete(ctx.state.cart()).unwrap();
    assert!(order.reference.starts_with("#VM"));
    assert_eq!(order.reference.len(), 11);
    assert_eq!(order.item_count, 3);
    assert_eq!(order.totals.subtotal, Price::from_cents(88_997));
    assert!(order.totals.free_shipping());
    assert_eq!(order.payment_method, PaymentMethod::Credit);

    assert!(ctx.state.cart().is_empty());
    assert_eq!(ctx.persisted(keys::CART), Some(serde_json::json!([])));
    assert_eq!(
        ctx.state.checkout_entry(CheckoutStep::Confirmation),
        CheckoutEntry::Proceed
    );
    assert!(
        ctx.messages()
            .iter()
            .any(|m| m == "Thank you for your purchase!")
    );
}

#[tokio::test]
async fn test_paypal_skips_card_details() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-8", 1).await.unwrap();

    let mut checkout = ctx.state.new_checkout();
    checkout.set_shipping_address(sample_address()).unwrap();
    checkout.submit_shipping().unwrap();

    let err = checkout.submit_payment().await.unwrap_err();
    assert!(matches!(err, CheckoutError::Validation { .. }));

    checkout.set_payment_method(PaymentMethod::Paypal).unwrap();
    checkout.submit_payment().await.unwrap();

    let order = checkout.complete(ctx.state.cart()).unwrap();
    assert_eq!(order.payment_method, PaymentMethod::Paypal);
}

#[tokio::test]
async fn test_incomplete_shipping_stays_on_shipping() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-3", 1).await.unwrap();

    let mut checkout = ctx.state.new_checkout();
    let mut address = sample_address();
    address.city.clear();
    checkout.set_shipping_address(address).unwrap();

    let err = checkout.submit_shipping().unwrap_err();
    assert_eq!(
        err,
        CheckoutError::Validation {
            message: "Please fill in all required shipping fields",
            missing: vec!["city"],
        }
    );
    assert_eq!(checkout.step(), CheckoutStep::Shipping);
    assert_eq!(ctx.state.cart().item_count(), 1);
}

#[tokio::test]
async fn test_separate_billing_address_is_validated() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-7", 1).await.unwrap();

    let mut checkout = ctx.state.new_checkout();
    checkout.set_shipping_address(sample_address()).unwrap();
    checkout.set_same_as_shipping(false).unwrap();
    checkout.submit_shipping().unwrap();
    checkout.set_payment_method(PaymentMethod::Paypal).unwrap();

    let err = checkout.submit_payment().await.unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Validation {
            message: "Please fill in all required billing fields",
            ..
        }
    ));
    assert!(!checkout.is_processing());

    checkout.set_billing_address(sample_address()).unwrap();
    checkout.submit_payment().await.unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Confirmation);
}
