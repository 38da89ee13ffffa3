//! User domain types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use vmart_core::{Email, UserId, UserRole};

/// An authenticated storefront user.
///
/// This is the record persisted under [`crate::storage::keys::USER`]. It never
/// carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
}

/// A login credential: a user plus their plaintext password.
///
/// Passwords are compared in plaintext against a static list; there is no
/// hashing. The password is still wrapped in a `SecretString` so it is
/// redacted from `Debug` output and logs.
#[derive(Debug, Clone)]
pub struct Credential {
    user: User,
    password: SecretString,
}

impl Credential {
    /// Create a credential.
    #[must_use]
    pub fn new(user: User, password: impl Into<String>) -> Self {
        Self {
            user,
            password: SecretString::from(password.into()),
        }
    }

    /// The user this credential belongs to, with the password stripped.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Case-sensitive email match.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.user.email.as_str() == email
    }

    /// Exact password match.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.password.expose_secret() == password
    }

    /// Replace the stored password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }
}
