//! Session error types.

use thiserror::Error;

/// Errors that can occur during session operations.
///
/// Every variant is also reported to the user through the store's notifier;
/// [`SessionError::notice`] is the message shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] vmart_core::EmailError),

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// A required form field is empty.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// New password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The operation needs a logged-in user.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl SessionError {
    /// User-facing message for this error.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::UserAlreadyExists => "Email already registered".to_string(),
            Self::Validation(message) | Self::WeakPassword(message) => message.clone(),
            Self::PasswordMismatch => "New passwords do not match".to_string(),
            Self::NotAuthenticated => "Please log in to continue".to_string(),
        }
    }
}
