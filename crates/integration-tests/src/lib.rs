//! Integration tests for `VMart`.
//!
//! Scenario tests live in `tests/` and drive a full [`AppState`] the way a
//! front end would. This library holds the shared fixtures.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vmart-integration-tests
//! ```

use std::sync::Arc;

use vmart_core::ProductId;
use vmart_storefront::config::StorefrontConfig;
use vmart_storefront::error::AppError;
use vmart_storefront::models::{Address, CardInfo, CartItem, Product, User};
use vmart_storefront::notify::MemoryNotifier;
use vmart_storefront::services::SessionError;
use vmart_storefront::state::AppState;
use vmart_storefront::storage::{KeyValueStorage, MemoryStorage};

/// Demo customer account.
pub const CUSTOMER_EMAIL: &str = "customer@example.com";
pub const CUSTOMER_PASSWORD: &str = "customer123";

/// An [`AppState`] with no simulated delays, plus handles on its storage and
/// notifications.
pub struct TestContext {
    pub storage: Arc<dyn KeyValueStorage>,
    pub notifier: Arc<MemoryNotifier>,
    pub state: AppState,
}

impl TestContext {
    /// Fresh context over empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Context over existing storage, as after an application restart.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn KeyValueStorage>) -> Self {
        let notifier = Arc::new(MemoryNotifier::new());
        let state = AppState::new(
            StorefrontConfig::instant(),
            storage.clone(),
            notifier.clone(),
        );
        Self {
            storage,
            notifier,
            state,
        }
    }

    /// A new context sharing this one's storage.
    #[must_use]
    pub fn restart(&self) -> Self {
        Self::with_storage(self.storage.clone())
    }

    /// Log in as the demo customer.
    ///
    /// # Errors
    ///
    /// Returns the session error if the demo credentials are rejected.
    pub async fn login_customer(&self) -> Result<User, SessionError> {
        self.state
            .session()
            .login(CUSTOMER_EMAIL, CUSTOMER_PASSWORD)
            .await
    }

    /// Look up a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if `id` is not in the catalog.
    pub async fn product(&self, id: &str) -> Result<Product, AppError> {
        self.state
            .catalog()
            .get_by_id(&ProductId::new(id))
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if `id` is not in the catalog.
    pub async fn add_to_cart(&self, id: &str, quantity: u32) -> Result<(), AppError> {
        let product = self.product(id).await?;
        self.state
            .cart()
            .add_to_cart_quantity(&CartItem::from(&product), quantity);
        Ok(())
    }

    /// Raw JSON persisted under `key`, if any.
    #[must_use]
    pub fn persisted(&self, key: &str) -> Option<serde_json::Value> {
        let raw = self.storage.get(key).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Notification messages sent so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notifier.messages()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete shipping address.
#[must_use]
pub fn sample_address() -> Address {
    Address {
        full_name: "Jane Doe".to_string(),
        phone: String::new(),
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        country: "US".to_string(),
    }
}

/// Complete card details.
#[must_use]
pub fn sample_card() -> CardInfo {
    CardInfo {
        card_number: "4242 4242 4242 4242".to_string(),
        name_on_card: "Jane Doe".to_string(),
        expiry: "12/30".to_string(),
        cvv: "123".to_string(),
    }
}
