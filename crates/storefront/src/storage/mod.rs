//! Durable key-value storage for store state.
//!
//! Each store persists its whole state as one JSON blob under a fixed key
//! (see [`keys`]). Storage is whole-value only: there are no partial updates,
//! queries or transactions.
//!
//! # Implementations
//!
//! - [`MemoryStorage`] - process-local map, used in tests
//! - [`FileStorage`] - one `<key>.json` file per key in a directory, used by the
//!   CLI so state survives between invocations

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys, one per logical store.
pub mod keys {
    /// Key for the authenticated user record.
    pub const USER: &str = "vmart-user";

    /// Key for the cart line items.
    pub const CART: &str = "vmart-cart";

    /// Key for the wishlist entries.
    pub const WISHLIST: &str = "vmart-wishlist";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used as a storage location.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String-keyed storage of serialized values.
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and deserialize the value under `key`.
///
/// Missing values, unreadable storage and malformed JSON all yield `None`.
/// Corruption is logged, never propagated: callers fall back to their empty
/// state.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to read persisted state");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed persisted state; ignoring it");
            None
        }
    }
}

/// Serialize `value` and store it under `key`.
///
/// Write failures are logged; in-memory state stays authoritative.
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to serialize state");
            return;
        }
    };

    if let Err(e) = storage.set(key, &json) {
        tracing::error!(key, error = %e, "failed to persist state");
    }
}

/// Remove the value under `key`, logging failures.
pub fn remove_key(storage: &dyn KeyValueStorage, key: &str) {
    if let Err(e) = storage.remove(key) {
        tracing::error!(key, error = %e, "failed to remove persisted state");
    }
}
