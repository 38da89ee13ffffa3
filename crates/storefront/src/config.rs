//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `VMART_STORAGE_DIR` - Directory for persisted state (default: `.vmart`)
//! - `VMART_AUTH_LATENCY_MS` - Simulated login/registration delay (default: 800)
//! - `VMART_CATALOG_LATENCY_MS` - Overrides every simulated catalog delay
//! - `VMART_PAYMENT_DELAY_MS` - Simulated payment processing time (default: 1500)
//! - `VMART_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: `development`)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::catalog::CatalogLatency;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding one JSON file per persisted store
    pub storage_dir: PathBuf,
    /// Simulated login/registration delay
    pub auth_latency: Duration,
    /// Simulated catalog delays
    pub catalog_latency: CatalogLatency,
    /// Simulated payment processing time
    pub payment_delay: Duration,
    /// How long catalog responses stay cached
    pub catalog_cache_ttl: Duration,
    /// Sentry error tracking
    pub sentry: SentryConfig,
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; error tracking is disabled when unset
    pub dsn: Option<SecretString>,
    /// Environment tag attached to events
    pub environment: String,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".vmart"),
            auth_latency: crate::services::session::DEFAULT_AUTH_LATENCY,
            catalog_latency: CatalogLatency::default(),
            payment_delay: crate::services::checkout::DEFAULT_PAYMENT_DELAY,
            catalog_cache_ttl: crate::catalog::DEFAULT_CACHE_TTL,
            sentry: SentryConfig {
                dsn: None,
                environment: "development".to_string(),
            },
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a numeric variable does not
    /// parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = Env(&lookup);

        let catalog_latency = env
            .millis("VMART_CATALOG_LATENCY_MS")?
            .map_or(defaults.catalog_latency, CatalogLatency::uniform);

        Ok(Self {
            storage_dir: env
                .optional("VMART_STORAGE_DIR")
                .map_or(defaults.storage_dir, PathBuf::from),
            auth_latency: env
                .millis("VMART_AUTH_LATENCY_MS")?
                .unwrap_or(defaults.auth_latency),
            catalog_latency,
            payment_delay: env
                .millis("VMART_PAYMENT_DELAY_MS")?
                .unwrap_or(defaults.payment_delay),
            catalog_cache_ttl: env
                .number("VMART_CATALOG_CACHE_TTL_SECS")?
                .map_or(defaults.catalog_cache_ttl, Duration::from_secs),
            sentry: SentryConfig {
                dsn: env.optional("SENTRY_DSN").map(SecretString::from),
                environment: env.or_default("SENTRY_ENVIRONMENT", "development"),
            },
        })
    }

    /// No simulated delays anywhere. Used by tests and scripted runs.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            auth_latency: Duration::ZERO,
            catalog_latency: CatalogLatency::uniform(Duration::ZERO),
            payment_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an optional unsigned integer.
    fn number(&self, key: &str) -> Result<Option<u64>, ConfigError> {
        self.optional(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Parse an optional millisecond duration.
    fn millis(&self, key: &str) -> Result<Option<Duration>, ConfigError> {
        Ok(self.number(key)?.map(Duration::from_millis))
    }
}
