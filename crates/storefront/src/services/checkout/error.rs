//! Checkout error types.

use thiserror::Error;

use vmart_core::CheckoutStep;

/// Errors that can occur while moving through checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Required form fields are empty.
    #[error("{message} (missing: {})", missing.join(", "))]
    Validation {
        /// Message shown to the user.
        message: &'static str,
        /// Names of the empty fields, in form order.
        missing: Vec<&'static str>,
    },

    /// The requested action is not available at the current step.
    #[error("cannot {action} during the {step} step")]
    InvalidTransition {
        action: &'static str,
        step: CheckoutStep,
    },

    /// A payment submission is already being processed.
    #[error("payment is already being processed")]
    PaymentInProgress,

    /// The order has been confirmed and can no longer be edited.
    #[error("order already confirmed")]
    AlreadyConfirmed,
}

impl CheckoutError {
    pub(super) const fn validation(message: &'static str, missing: Vec<&'static str>) -> Self {
        Self::Validation { message, missing }
    }

    pub(super) const fn invalid(action: &'static str, step: CheckoutStep) -> Self {
        Self::InvalidTransition { action, step }
    }
}
