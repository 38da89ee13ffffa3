//! Session lifecycle and its effect on the other stores.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use vmart_core::{ProductId, UserRole};
use vmart_integration_tests::{CUSTOMER_EMAIL, TestContext};
use vmart_storefront::services::SessionError;
use vmart_storefront::storage::{FileStorage, KeyValueStorage, keys};

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_wishlist_but_keeps_cart() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();

    for id in ["product-2", "product-8"] {
        let product = ctx.product(id).await.unwrap();
        assert!(ctx.state.wishlist().add(product));
    }
    ctx.add_to_cart("product-4", 3).await.unwrap();
    assert_eq!(ctx.persisted(keys::WISHLIST).unwrap().as_array().unwrap().len(), 2);

    ctx.state.session().logout();

    assert!(ctx.state.session().current_user().is_none());
    assert!(ctx.state.wishlist().is_empty());
    assert!(ctx.persisted(keys::WISHLIST).is_none());
    assert!(ctx.persisted(keys::USER).is_none());
    assert_eq!(ctx.state.cart().item_count(), 3);
    assert_eq!(ctx.messages().last().unwrap(), "Logged out successfully");
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_logs_in_as_customer() {
    let ctx = TestContext::new();

    let user = ctx
        .state
        .session()
        .register("Sam Shopper", "sam@example.com", "hunter22")
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::Customer);
    assert!(user.id.as_str().starts_with("user"));
    assert_eq!(ctx.state.session().current_user(), Some(user.clone()));
    assert_eq!(
        ctx.persisted(keys::USER).unwrap()["email"],
        "sam@example.com"
    );

    ctx.state.session().logout();
    let again = ctx
        .state
        .session()
        .login("sam@example.com", "hunter22")
        .await
        .unwrap();
    assert_eq!(again.id, user.id);
}

#[tokio::test]
async fn test_duplicate_registration_leaves_session_unchanged() {
    let ctx = TestContext::new();
    let customer = ctx.login_customer().await.unwrap();

    let err = ctx
        .state
        .session()
        .register("Impostor", CUSTOMER_EMAIL, "whatever1")
        .await
        .unwrap_err();

    assert_eq!(err, SessionError::UserAlreadyExists);
    assert_eq!(ctx.state.session().current_user(), Some(customer));
    assert_eq!(ctx.messages().last().unwrap(), "Email already registered");
}

#[tokio::test]
async fn test_failed_login_does_not_end_existing_session() {
    let ctx = TestContext::new();
    let customer = ctx.login_customer().await.unwrap();
    ctx.state
        .wishlist()
        .add(ctx.product("product-1").await.unwrap());

    let err = ctx
        .state
        .session()
        .login(CUSTOMER_EMAIL, "wrong")
        .await
        .unwrap_err();

    assert_eq!(err, SessionError::InvalidCredentials);
    assert_eq!(ctx.state.session().current_user(), Some(customer));
    assert_eq!(ctx.state.wishlist().len(), 1);
}

// =============================================================================
// Wishlist to Cart
// =============================================================================

#[tokio::test]
async fn test_add_all_to_cart_keeps_wishlist() {
    let ctx = TestContext::new();
    for id in ["product-5", "product-6"] {
        ctx.state.wishlist().add(ctx.product(id).await.unwrap());
    }
    ctx.add_to_cart("product-5", 1).await.unwrap();

    ctx.state.wishlist().add_all_to_cart(ctx.state.cart());

    let cart = ctx.state.cart();
    assert_eq!(cart.quantity_of(&ProductId::new("product-5")), 2);
    assert_eq!(cart.quantity_of(&ProductId::new("product-6")), 1);
    assert_eq!(ctx.state.wishlist().len(), 2);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_state_survives_restart() {
    let ctx = TestContext::new();
    ctx.login_customer().await.unwrap();
    ctx.add_to_cart("product-3", 2).await.unwrap();
    ctx.state
        .wishlist()
        .add(ctx.product("product-7").await.unwrap());

    let restarted = ctx.restart();

    let user = restarted.state.session().current_user().unwrap();
    assert_eq!(user.email.as_str(), CUSTOMER_EMAIL);
    assert_eq!(restarted.state.cart().item_count(), 2);
    assert!(
        restarted
            .state
            .wishlist()
            .contains(&ProductId::new("product-7"))
    );
}

#[tokio::test]
async fn test_file_storage_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ctx = TestContext::with_storage(Arc::new(FileStorage::new(dir.path())));
        ctx.login_customer().await.unwrap();
        ctx.add_to_cart("product-2", 1).await.unwrap();
    }

    assert!(dir.path().join(format!("{}.json", keys::CART)).exists());

    let ctx = TestContext::with_storage(Arc::new(FileStorage::new(dir.path())));
    assert!(ctx.state.session().is_authenticated());
    assert_eq!(ctx.state.cart().items()[0].product_id.as_str(), "product-2");

    ctx.state.session().logout();
    assert!(!dir.path().join(format!("{}.json", keys::USER)).exists());
}

#[tokio::test]
async fn test_corrupt_persisted_cart_starts_empty() {
    let ctx = TestContext::new();
    ctx.storage.set(keys::CART, "{not json").unwrap();

    let restarted = ctx.restart();
    assert!(restarted.state.cart().is_empty());
}
