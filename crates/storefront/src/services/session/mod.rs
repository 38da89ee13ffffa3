//! Session store.
//!
//! Holds the current authenticated identity, if any, and persists it under
//! [`keys::USER`] so it survives restarts.
//!
//! Other stores react to login and logout through [`SessionListener`]. The
//! wishlist, for example, clears itself when it receives
//! [`SessionEvent::Ended`].

mod credentials;
mod error;

pub use credentials::CredentialDirectory;
pub use error::SessionError;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;
use tracing::{info, instrument, warn};

use vmart_core::{Email, UserId, UserRole};

use crate::models::{Credential, User};
use crate::notify::Notifier;
use crate::storage::{KeyValueStorage, keys, load_json, remove_key, save_json};

/// Simulated round-trip for login and registration.
pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(800);

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// A change in the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A user logged in or registered.
    Started(User),
    /// The user logged out.
    Ended,
}

/// Receives session events.
///
/// Listeners run synchronously on the thread that changed the session, after
/// the session's own state has been updated.
pub trait SessionListener: Send + Sync {
    fn on_session_event(&self, event: &SessionEvent);
}

/// The current authenticated identity.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
    credentials: RwLock<CredentialDirectory>,
    user: RwLock<Option<User>>,
    listeners: RwLock<Vec<Arc<dyn SessionListener>>>,
    latency: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.current_user())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a session store, restoring any persisted user.
    ///
    /// A malformed persisted record is logged and ignored.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let user: Option<User> = load_json(storage.as_ref(), keys::USER);
        if let Some(user) = &user {
            info!(user_id = %user.id, "restored session");
        }

        Self {
            storage,
            notifier,
            credentials: RwLock::new(CredentialDirectory::demo()),
            user: RwLock::new(user),
            listeners: RwLock::new(Vec::new()),
            latency: DEFAULT_AUTH_LATENCY,
        }
    }

    /// Override the simulated authentication latency.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the credential directory.
    #[must_use]
    pub fn with_credentials(self, credentials: CredentialDirectory) -> Self {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
        self
    }

    /// Register a listener for session events.
    pub fn subscribe(&self, listener: Arc<dyn SessionListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in with email and password.
    ///
    /// The email comparison is case-sensitive and the password must match
    /// exactly. On failure the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` if no account matches.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        self.simulate_latency().await;

        let matched = self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .authenticate(email, password)
            .cloned();

        let Some(user) = matched else {
            warn!("login rejected");
            return Err(self.reject(SessionError::InvalidCredentials));
        };

        self.begin(user.clone());
        info!(user_id = %user.id, role = %user.role, "user logged in");
        self.notifier.success("Login successful!");
        Ok(user)
    }

    /// Register a new customer account and log it in.
    ///
    /// The account is usable for the rest of the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` if the name or password is empty.
    /// Returns `SessionError::InvalidEmail` if the email is malformed.
    /// Returns `SessionError::UserAlreadyExists` if the email is taken.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        self.simulate_latency().await;

        let user = match self.create_account(name, email, password) {
            Ok(user) => user,
            Err(e) => return Err(self.reject(e)),
        };

        self.begin(user.clone());
        info!(user_id = %user.id, "user registered");
        self.notifier.success("Registration successful!");
        Ok(user)
    }

    /// End the session.
    ///
    /// Listeners receive [`SessionEvent::Ended`] after the persisted user
    /// record has been removed.
    pub fn logout(&self) {
        let previous = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        remove_key(self.storage.as_ref(), keys::USER);

        if let Some(user) = previous {
            info!(user_id = %user.id, "user logged out");
        }

        self.emit(&SessionEvent::Ended);
        self.notifier.info("Logged out successfully");
    }

    /// Change the logged-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` if nobody is logged in.
    /// Returns `SessionError::PasswordMismatch` if `new` and `confirm` differ.
    /// Returns `SessionError::WeakPassword` if `new` is too short.
    /// Returns `SessionError::Validation` if `current` is wrong.
    #[instrument(skip_all)]
    pub fn change_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), SessionError> {
        match self.update_password(current, new, confirm) {
            Ok(()) => {
                self.notifier.success("Password updated successfully!");
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn create_account(&self, name: &str, email: &str, password: &str) -> Result<User, SessionError> {
        if name.is_empty() || password.is_empty() {
            return Err(SessionError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        let email = Email::parse(email)?;

        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if credentials.contains_email(email.as_str()) {
            return Err(SessionError::UserAlreadyExists);
        }

        let millis = Utc::now().timestamp_millis();
        let mut id = UserId::new(format!("user{millis}"));
        let mut suffix = 1_u32;
        while credentials.contains_id(&id) {
            suffix += 1;
            id = UserId::new(format!("user{millis}-{suffix}"));
        }

        let user = User {
            id,
            name: name.to_string(),
            email,
            role: UserRole::Customer,
        };
        credentials.insert(Credential::new(user.clone(), password));
        Ok(user)
    }

    fn update_password(&self, current: &str, new: &str, confirm: &str) -> Result<(), SessionError> {
        let user = self.current_user().ok_or(SessionError::NotAuthenticated)?;

        if new != confirm {
            return Err(SessionError::PasswordMismatch);
        }
        if new.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SessionError::WeakPassword(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let credential = credentials
            .get_mut(user.email.as_str())
            .filter(|c| c.password_matches(current))
            .ok_or_else(|| SessionError::Validation("Current password is incorrect".to_string()))?;
        credential.set_password(new);

        info!(user_id = %user.id, "password changed");
        Ok(())
    }

    fn begin(&self, user: User) {
        save_json(self.storage.as_ref(), keys::USER, &user);
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        self.emit(&SessionEvent::Started(user));
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_session_event(event);
        }
    }

    fn reject(&self, error: SessionError) -> SessionError {
        self.notifier.error(&error.notice());
        error
    }
}
