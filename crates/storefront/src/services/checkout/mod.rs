//! Checkout sequencer.
//!
//! A forward-only state machine over [`CheckoutStep`]:
//!
//! ```text
//! Shipping --submit_shipping--> Payment --submit_payment--> Confirmation
//!    ^                             |
//!    +-------back_to_shipping------+
//! ```
//!
//! Each forward transition validates the form for its step. The sequencer is
//! transient: nothing here is persisted, and [`CheckoutSequencer::complete`]
//! consumes it once the order is confirmed.

mod error;
pub mod pricing;

pub use error::CheckoutError;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{info, instrument};

use vmart_core::{CheckoutStep, PaymentMethod, ShippingMethod};

use super::cart::CartStore;
use super::session::SessionStore;
use crate::models::{Address, CardInfo, OrderTotals};
use crate::notify::Notifier;

/// Simulated payment processing time.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// Where the login page sends the user back to after authenticating.
pub const CHECKOUT_RETURN_TARGET: &str = "checkout";

// =============================================================================
// Entry guard
// =============================================================================

/// Outcome of trying to open the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEntry {
    Proceed,
    /// Not logged in; log in first, then return to `return_to`.
    RedirectToLogin { return_to: &'static str },
    /// Nothing to check out.
    RedirectToCart,
}

/// Decide whether checkout can be shown for `step`.
///
/// An empty cart is allowed at [`CheckoutStep::Confirmation`] so the
/// confirmation survives the cart being cleared.
#[must_use]
pub fn checkout_entry(session: &SessionStore, cart: &CartStore, step: CheckoutStep) -> CheckoutEntry {
    if !session.is_authenticated() {
        return CheckoutEntry::RedirectToLogin {
            return_to: CHECKOUT_RETURN_TARGET,
        };
    }
    if cart.is_empty() && step != CheckoutStep::Confirmation {
        return CheckoutEntry::RedirectToCart;
    }
    CheckoutEntry::Proceed
}

// =============================================================================
// Sequencer
// =============================================================================

/// Summary of a confirmed order, taken before the cart is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedOrder {
    /// Display reference, `#VM` followed by eight digits.
    pub reference: String,
    pub totals: OrderTotals,
    pub item_count: u64,
    pub shipping_address: Address,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

/// Multi-step checkout form and its current step.
pub struct CheckoutSequencer {
    step: CheckoutStep,
    shipping_address: Address,
    billing_address: Address,
    same_as_shipping: bool,
    shipping_method: ShippingMethod,
    payment_method: PaymentMethod,
    card: CardInfo,
    processing: bool,
    payment_delay: Duration,
    order_reference: Option<String>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CheckoutSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSequencer")
            .field("step", &self.step)
            .field("same_as_shipping", &self.same_as_shipping)
            .field("shipping_method", &self.shipping_method)
            .field("payment_method", &self.payment_method)
            .field("card", &self.card)
            .field("processing", &self.processing)
            .field("order_reference", &self.order_reference)
            .finish_non_exhaustive()
    }
}

impl CheckoutSequencer {
    /// Start a checkout at the shipping step with default options.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            step: CheckoutStep::Shipping,
            shipping_address: Address::default(),
            billing_address: Address::default(),
            same_as_shipping: true,
            shipping_method: ShippingMethod::default(),
            payment_method: PaymentMethod::default(),
            card: CardInfo::default(),
            processing: false,
            payment_delay: DEFAULT_PAYMENT_DELAY,
            order_reference: None,
            notifier,
        }
    }

    /// Override the simulated payment processing time.
    #[must_use]
    pub const fn with_payment_delay(mut self, delay: Duration) -> Self {
        self.payment_delay = delay;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// The billing address. Mirrors the shipping address, as of the last
    /// shipping submission, while [`Self::same_as_shipping`] is set.
    #[must_use]
    pub const fn billing_address(&self) -> &Address {
        &self.billing_address
    }

    #[must_use]
    pub const fn same_as_shipping(&self) -> bool {
        self.same_as_shipping
    }

    #[must_use]
    pub const fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub const fn card(&self) -> &CardInfo {
        &self.card
    }

    /// Returns `true` while a payment submission is pending.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// The order reference, once confirmed.
    #[must_use]
    pub fn order_reference(&self) -> Option<&str> {
        self.order_reference.as_deref()
    }

    /// Totals for the current cart and shipping method.
    #[must_use]
    pub fn totals(&self, cart: &CartStore) -> OrderTotals {
        pricing::order_totals(cart.cart_total(), self.shipping_method)
    }

    // =========================================================================
    // Form edits
    // =========================================================================

    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyConfirmed` after confirmation, or
    /// `CheckoutError::PaymentInProgress` while a payment is processing.
    pub fn set_shipping_address(&mut self, address: Address) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.shipping_address = address;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyConfirmed` after confirmation, or
    /// `CheckoutError::PaymentInProgress` while a payment is processing.
    pub fn set_billing_address(&mut self, address: Address) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.billing_address = address;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyConfirmed` after confirmation, or
    /// `CheckoutError::PaymentInProgress` while a payment is processing.
    pub fn set_same_as_shipping(&mut self, same: bool) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.same_as_shipping = same;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyConfirmed` after confirmation, or
    /// `CheckoutError::PaymentInProgress` while a payment is processing.
    pub fn set_shipping_method(&mut self, method: ShippingMethod) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.shipping_method = method;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyConfirmed` after confirmation, or
    /// `CheckoutError::PaymentInProgress` while a payment is processing.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.payment_method = method;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyConfirmed` after confirmation, or
    /// `CheckoutError::PaymentInProgress` while a payment is processing.
    pub fn set_card(&mut self, card: CardInfo) -> Result<(), CheckoutError> {
        self.ensure_editable()?;
        self.card = card;
        Ok(())
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Validate the shipping form and move to payment.
    ///
    /// With "same as shipping" set, the shipping address is copied into the
    /// billing address at this point.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` outside the shipping step.
    /// Returns `CheckoutError::Validation` if required fields are empty.
    #[instrument(skip(self), fields(step = %self.step))]
    pub fn submit_shipping(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Shipping {
            return Err(CheckoutError::invalid("submit shipping", self.step));
        }

        let missing = self.shipping_address.missing_fields();
        if !missing.is_empty() {
            return Err(self.reject("Please fill in all required shipping fields", missing));
        }

        if self.same_as_shipping {
            self.billing_address = self.shipping_address.clone();
        }
        self.step = CheckoutStep::Payment;
        info!(method = %self.shipping_method, "shipping details accepted");
        Ok(())
    }

    /// Return from payment to shipping, keeping everything entered so far.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::PaymentInProgress` while a payment is pending.
    /// Returns `CheckoutError::InvalidTransition` outside the payment step.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutError> {
        if self.processing {
            return Err(CheckoutError::PaymentInProgress);
        }
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::invalid("go back to shipping", self.step));
        }
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Validate the payment form, wait out the payment delay, then confirm.
    ///
    /// Card details are required for credit payments. Billing fields are
    /// required when billing differs from shipping. The shipping address is
    /// checked again since it stays editable at the payment step.
    ///
    /// While the delay runs the sequencer is processing and rejects every
    /// edit. If the returned future is dropped mid-delay the payment is
    /// abandoned and the sequencer stays at the payment step, ready for a
    /// retry.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` outside the payment step.
    /// Returns `CheckoutError::PaymentInProgress` if a payment is pending.
    /// Returns `CheckoutError::Validation` if required fields are empty.
    #[instrument(skip(self), fields(method = %self.payment_method))]
    pub async fn submit_payment(&mut self) -> Result<(), CheckoutError> {
        self.validate_payment()?;

        let delay = self.payment_delay;
        {
            self.processing = true;
            let _reset = ClearOnDrop(&mut self.processing);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        self.confirm();
        Ok(())
    }

    /// Clear the cart and close out the order.
    ///
    /// Totals are captured before the cart is cleared.
    ///
    /// # Errors
    ///
    /// Returns the sequencer unchanged if the order is not yet confirmed.
    pub fn complete(self, cart: &CartStore) -> Result<CompletedOrder, Box<Self>> {
        let Some(reference) = self.order_reference.clone() else {
            return Err(Box::new(self));
        };

        let order = CompletedOrder {
            reference,
            totals: self.totals(cart),
            item_count: cart.item_count(),
            shipping_address: self.shipping_address,
            shipping_method: self.shipping_method,
            payment_method: self.payment_method,
        };

        cart.clear_cart();
        self.notifier.success("Thank you for your purchase!");
        Ok(order)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_editable(&self) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Confirmation {
            return Err(CheckoutError::AlreadyConfirmed);
        }
        if self.processing {
            return Err(CheckoutError::PaymentInProgress);
        }
        Ok(())
    }

    fn validate_payment(&self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::invalid("submit payment", self.step));
        }
        if self.processing {
            return Err(CheckoutError::PaymentInProgress);
        }

        let missing = self.shipping_address.missing_fields();
        if !missing.is_empty() {
            return Err(self.reject("Please fill in all required shipping fields", missing));
        }

        if self.payment_method == PaymentMethod::Credit {
            let missing = self.card.missing_fields();
            if !missing.is_empty() {
                return Err(self.reject("Please fill in all payment details", missing));
            }
        }

        if !self.same_as_shipping {
            let missing = self.billing_address.missing_fields();
            if !missing.is_empty() {
                return Err(self.reject("Please fill in all required billing fields", missing));
            }
        }

        Ok(())
    }

    fn confirm(&mut self) {
        let reference = generate_order_reference();
        info!(reference = %reference, method = %self.payment_method, "order confirmed");

        self.step = CheckoutStep::Confirmation;
        self.order_reference = Some(reference);
    }

    fn reject(&self, message: &'static str, missing: Vec<&'static str>) -> CheckoutError {
        self.notifier.error(message);
        CheckoutError::validation(message, missing)
    }
}

/// Resets the processing flag when the payment wait ends, however it ends.
struct ClearOnDrop<'a>(&'a mut bool);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn generate_order_reference() -> String {
    let digits: u32 = rand::rng().random_range(0..100_000_000);
    format!("#VM{digits:08}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    use proptest::prelude::*;
    use vmart_core::{Price, ProductId};

    use super::*;
    use crate::models::CartItem;
    use crate::notify::MemoryNotifier;
    use crate::storage::MemoryStorage;

    fn address() -> Address {
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

    fn card() -> CardInfo {
        CardInfo {
            card_number: "4111111111111111".to_string(),
            name_on_card: "Jane Doe".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn sequencer() -> (Arc<MemoryNotifier>, CheckoutSequencer) {
        let notifier = Arc::new(MemoryNotifier::new());
        let checkout = CheckoutSequencer::new(notifier.clone()).with_payment_delay(Duration::ZERO);
        (notifier, checkout)
    }

    fn cart_with(cents: i64) -> CartStore {
        let cart = CartStore::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(MemoryNotifier::new()),
        );
        cart.add_to_cart(CartItem {
            product_id: ProductId::new("product-x"),
            name: "Thing".to_string(),
            unit_price: Price::from_cents(cents),
            image: String::new(),
        });
        cart
    }

    #[test]
    fn test_shipping_validation_names_missing_fields() {
        let (notifier, mut checkout) = sequencer();
        let mut partial = address();
        partial.city.clear();
        partial.country.clear();
        checkout.set_shipping_address(partial).unwrap();

        let err = checkout.submit_shipping().unwrap_err();
        assert_eq!(
            err,
            CheckoutError::Validation {
                message: "Please fill in all required shipping fields",
                missing: vec!["city", "country"],
            }
        );
        assert_eq!(checkout.step(), CheckoutStep::Shipping);
        assert_eq!(
            notifier.messages(),
            vec!["Please fill in all required shipping fields"]
        );
    }

    #[test]
    fn test_same_as_shipping_snapshots_billing() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();

        assert_eq!(checkout.step(), CheckoutStep::Payment);
        assert_eq!(checkout.billing_address(), &address());

        // Later shipping edits do not flow into the billing snapshot.
        let mut moved = address();
        moved.city = "Shelbyville".to_string();
        checkout.set_shipping_address(moved).unwrap();
        assert_eq!(checkout.billing_address().city, "Springfield");
    }

    #[test]
    fn test_submit_shipping_only_from_shipping_step() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();

        assert!(matches!(
            checkout.submit_shipping(),
            Err(CheckoutError::InvalidTransition {
                step: CheckoutStep::Payment,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_payment_requires_shipping_first() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.set_card(card()).unwrap();

        assert!(matches!(
            checkout.submit_payment().await,
            Err(CheckoutError::InvalidTransition { .. })
        ));
        assert_eq!(checkout.step(), CheckoutStep::Shipping);
    }

    #[tokio::test]
    async fn test_shipping_cleared_after_submission_blocks_payment() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_card(card()).unwrap();
        checkout.set_shipping_address(Address::default()).unwrap();

        let err = checkout.submit_payment().await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Validation {
                message: "Please fill in all required shipping fields",
                ..
            }
        ));
        assert_eq!(checkout.step(), CheckoutStep::Payment);
    }

    #[tokio::test]
    async fn test_credit_payment_requires_card() {
        let (notifier, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();

        let err = checkout.submit_payment().await.unwrap_err();
        assert!(matches!(err, CheckoutError::Validation { .. }));
        assert_eq!(checkout.step(), CheckoutStep::Payment);
        assert!(!checkout.is_processing());
        assert_eq!(
            notifier.last().unwrap().message,
            "Please fill in all payment details"
        );
    }

    #[tokio::test]
    async fn test_paypal_skips_card_but_checks_billing() {
        let (notifier, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.set_same_as_shipping(false).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_payment_method(PaymentMethod::Paypal).unwrap();

        let err = checkout.submit_payment().await.unwrap_err();
        assert_eq!(
            err,
            CheckoutError::Validation {
                message: "Please fill in all required billing fields",
                missing: vec![
                    "full name",
                    "address",
                    "city",
                    "state",
                    "postal code",
                    "country"
                ],
            }
        );
        assert_eq!(
            notifier.last().unwrap().message,
            "Please fill in all required billing fields"
        );

        checkout.set_billing_address(address()).unwrap();
        checkout.submit_payment().await.unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    }

    #[tokio::test]
    async fn test_confirmation_has_reference_and_locks_form() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_card(card()).unwrap();
        checkout.submit_payment().await.unwrap();

        let reference = checkout.order_reference().unwrap();
        assert!(reference.starts_with("#VM"));
        assert_eq!(reference.len(), 11);
        assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));

        assert_eq!(
            checkout.set_shipping_method(ShippingMethod::Express),
            Err(CheckoutError::AlreadyConfirmed)
        );
        assert!(checkout.back_to_shipping().is_err());
    }

    #[tokio::test]
    async fn test_processing_rejects_edits_and_resubmission() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_card(card()).unwrap();
        checkout.processing = true;

        assert_eq!(
            checkout.set_card(CardInfo::default()),
            Err(CheckoutError::PaymentInProgress)
        );
        assert_eq!(
            checkout.set_same_as_shipping(false),
            Err(CheckoutError::PaymentInProgress)
        );
        assert_eq!(
            checkout.set_billing_address(Address::default()),
            Err(CheckoutError::PaymentInProgress)
        );
        assert_eq!(
            checkout.set_shipping_address(Address::default()),
            Err(CheckoutError::PaymentInProgress)
        );
        assert_eq!(
            checkout.set_payment_method(PaymentMethod::Paypal),
            Err(CheckoutError::PaymentInProgress)
        );
        assert_eq!(
            checkout.back_to_shipping(),
            Err(CheckoutError::PaymentInProgress)
        );
        assert_eq!(
            checkout.submit_payment().await,
            Err(CheckoutError::PaymentInProgress)
        );

        assert_eq!(checkout.card(), &card());
        assert_eq!(checkout.step(), CheckoutStep::Payment);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_payment_future_leaves_payment_step() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut checkout = CheckoutSequencer::new(notifier);
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_card(card()).unwrap();

        {
            let mut future = pin!(checkout.submit_payment());
            let mut cx = Context::from_waker(Waker::noop());
            assert!(future.as_mut().poll(&mut cx).is_pending());
        }

        assert!(!checkout.is_processing());
        assert_eq!(checkout.step(), CheckoutStep::Payment);

        checkout.set_payment_method(PaymentMethod::Paypal).unwrap();
        checkout.back_to_shipping().unwrap();
        checkout.submit_shipping().unwrap();
        checkout.submit_payment().await.unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    }

    #[tokio::test(start_paused = true)]
    async fn test_payment_waits_for_delay() {
        let (_, checkout) = sequencer();
        let mut checkout = checkout.with_payment_delay(DEFAULT_PAYMENT_DELAY);
        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_card(card()).unwrap();

        let started = tokio::time::Instant::now();
        checkout.submit_payment().await.unwrap();
        assert!(started.elapsed() >= DEFAULT_PAYMENT_DELAY);
    }

    #[test]
    fn test_back_to_shipping_keeps_data() {
        let (_, mut checkout) = sequencer();
        checkout.set_shipping_address(address()).unwrap();
        checkout.set_shipping_method(ShippingMethod::Express).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.back_to_shipping().unwrap();

        assert_eq!(checkout.step(), CheckoutStep::Shipping);
        assert_eq!(checkout.shipping_address(), &address());
        assert_eq!(checkout.shipping_method(), ShippingMethod::Express);
        assert!(checkout.back_to_shipping().is_err());
    }

    #[tokio::test]
    async fn test_complete_clears_cart_after_capturing_totals() {
        let (notifier, mut checkout) = sequencer();
        let cart = cart_with(6_000);

        checkout.set_shipping_address(address()).unwrap();
        checkout.submit_shipping().unwrap();
        checkout.set_card(card()).unwrap();
        checkout.submit_payment().await.unwrap();

        let order = checkout.complete(&cart).unwrap();
        assert_eq!(order.totals.subtotal, Price::from_cents(6_000));
        assert!(order.totals.free_shipping());
        assert_eq!(order.item_count, 1);
        assert!(cart.is_empty());
        assert_eq!(
            notifier.last().unwrap().message,
            "Thank you for your purchase!"
        );
    }

    #[test]
    fn test_complete_before_confirmation_returns_sequencer() {
        let (_, checkout) = sequencer();
        let cart = cart_with(1_000);

        let checkout = checkout.complete(&cart).unwrap_err();
        assert_eq!(checkout.step(), CheckoutStep::Shipping);
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_totals_follow_shipping_method() {
        let (_, mut checkout) = sequencer();
        let cart = cart_with(3_000);
        assert_eq!(checkout.totals(&cart).shipping, Price::from_cents(499));

        checkout.set_shipping_method(ShippingMethod::Express).unwrap();
        assert_eq!(checkout.totals(&cart).shipping, Price::from_cents(1_299));
    }

    #[derive(Debug, Clone)]
    enum Op {
        SetShipping(bool),
        SetBilling(bool),
        SetSame(bool),
        SetPayment(bool),
        SetCard(bool),
        SubmitShipping,
        Back,
        SubmitPayment,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::SetShipping),
            any::<bool>().prop_map(Op::SetBilling),
            any::<bool>().prop_map(Op::SetSame),
            any::<bool>().prop_map(Op::SetPayment),
            any::<bool>().prop_map(Op::SetCard),
            Just(Op::SubmitShipping),
            Just(Op::Back),
            Just(Op::SubmitPayment),
        ]
    }

    fn pay_now(checkout: &mut CheckoutSequencer) -> Result<(), CheckoutError> {
        let mut future = pin!(checkout.submit_payment());
        let mut cx = Context::from_waker(Waker::noop());
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(result) => result,
            Poll::Pending => panic!("zero-delay payment should finish on first poll"),
        }
    }

    proptest! {
        #[test]
        fn prop_confirmation_implies_valid_forms(ops in prop::collection::vec(op(), 0..30)) {
            let (_, mut checkout) = sequencer();

            for op in ops {
                let _ = match op {
                    Op::SetShipping(full) => checkout.set_shipping_address(
                        if full { address() } else { Address::default() },
                    ),
                    Op::SetBilling(full) => checkout.set_billing_address(
                        if full { address() } else { Address::default() },
                    ),
                    Op::SetSame(same) => checkout.set_same_as_shipping(same),
                    Op::SetPayment(paypal) => checkout.set_payment_method(
                        if paypal { PaymentMethod::Paypal } else { PaymentMethod::Credit },
                    ),
                    Op::SetCard(full) => checkout.set_card(
                        if full { card() } else { CardInfo::default() },
                    ),
                    Op::SubmitShipping => checkout.submit_shipping(),
                    Op::Back => checkout.back_to_shipping(),
                    Op::SubmitPayment => pay_now(&mut checkout),
                };
                prop_assert!(!checkout.is_processing());
            }

            if checkout.step() == CheckoutStep::Confirmation {
                prop_assert!(checkout.order_reference().is_some());
                prop_assert!(checkout.shipping_address().missing_fields().is_empty());
                if checkout.payment_method() == PaymentMethod::Credit {
                    prop_assert!(checkout.card().missing_fields().is_empty());
                }
                if !checkout.same_as_shipping() {
                    prop_assert!(checkout.billing_address().missing_fields().is_empty());
                }
            }
        }
    }
}
