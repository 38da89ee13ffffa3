//! In-process credential directory.

use vmart_core::{Email, UserId, UserRole};

use crate::models::{Credential, User};

/// The set of accounts that can log in.
///
/// Seeded with the demo accounts. Registrations and password changes are
/// kept for the life of the process only.
#[derive(Debug, Clone, Default)]
pub struct CredentialDirectory {
    credentials: Vec<Credential>,
}

impl CredentialDirectory {
    /// An empty directory.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            credentials: Vec::new(),
        }
    }

    /// The built-in demo accounts, one per role.
    #[must_use]
    pub fn demo() -> Self {
        let accounts = [
            ("admin1", "Admin User", "admin@example.com", "admin123", UserRole::Admin),
            ("seller1", "Seller User", "seller@example.com", "seller123", UserRole::Seller),
            (
                "customer1",
                "Demo Customer",
                "customer@example.com",
                "customer123",
                UserRole::Customer,
            ),
        ];

        let credentials = accounts
            .into_iter()
            .filter_map(|(id, name, email, password, role)| {
                let email = Email::parse(email).ok()?;
                let user = User {
                    id: UserId::new(id),
                    name: name.to_string(),
                    email,
                    role,
                };
                Some(Credential::new(user, password))
            })
            .collect();

        Self { credentials }
    }

    /// Find the user whose email and password both match exactly.
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&User> {
        self.credentials
            .iter()
            .find(|c| c.has_email(email) && c.password_matches(password))
            .map(Credential::user)
    }

    /// Returns `true` if an account uses `email` (case-sensitive).
    #[must_use]
    pub fn contains_email(&self, email: &str) -> bool {
        self.credentials.iter().any(|c| c.has_email(email))
    }

    /// Add an account.
    pub fn insert(&mut self, credential: Credential) {
        self.credentials.push(credential);
    }

    /// Returns `true` if an account already has `id`.
    #[must_use]
    pub fn contains_id(&self, id: &UserId) -> bool {
        self.credentials.iter().any(|c| &c.user().id == id)
    }

    /// Mutable access to the credential registered under `email`.
    ///
    /// Emails are unique across the directory, so this is the lookup to use
    /// when modifying an account.
    pub fn get_mut(&mut self, email: &str) -> Option<&mut Credential> {
        self.credentials.iter_mut().find(|c| c.has_email(email))
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Returns `true` if there are no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
