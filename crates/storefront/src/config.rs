//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VITRINE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`).
//!   Required by every command that talks to the catalog, inventory or remote cart.
//! - `VITRINE_STORAGE_DIR` - Directory for device-local storage (default: `.vitrine`)
//! - `VITRINE_CHECKOUT_PHONE` - Shop phone number for the messaging checkout handoff
//! - `VITRINE_CURRENCY` - ISO 4217 store currency (default: `BRL`)
//! - `VITRINE_INVENTORY_TTL_SECS` - Inventory cache lifetime in seconds (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use vitrine_core::CurrencyCode;

const DEFAULT_STORAGE_DIR: &str = ".vitrine";
const DEFAULT_INVENTORY_TTL_SECS: u64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Directory holding device-local storage
    pub storage_dir: PathBuf,
    /// Shop phone number used for the checkout handoff
    pub checkout_phone: Option<String>,
    /// Store currency for prices and totals
    pub currency: CurrencyCode,
    /// How long fetched inventory rows stay cached
    pub inventory_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. `production`)
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("VITRINE_DATABASE_URL")
            .or_else(|| get("DATABASE_URL"))
            .map(SecretString::from);

        let storage_dir = get("VITRINE_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let currency = match get("VITRINE_CURRENCY") {
            Some(raw) => raw.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_CURRENCY".to_string(), e)
            })?,
            None => CurrencyCode::default(),
        };

        let ttl_secs = match get("VITRINE_INVENTORY_TTL_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_INVENTORY_TTL_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_INVENTORY_TTL_SECS,
        };

        Ok(Self {
            database_url,
            storage_dir,
            checkout_phone: get("VITRINE_CHECKOUT_PHONE").filter(|p| !p.trim().is_empty()),
            currency,
            inventory_ttl: Duration::from_secs(ttl_secs),
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// The database URL, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no database URL is configured.
    pub fn require_database_url(&self) -> Result<&SecretString, ConfigError> {
        self.database_url
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("VITRINE_DATABASE_URL".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.storage_dir, PathBuf::from(".vitrine"));
        assert_eq!(config.currency, CurrencyCode::BRL);
        assert_eq!(config.inventory_ttl, Duration::from_secs(60));
        assert!(config.checkout_phone.is_none());
        assert!(matches!(
            config.require_database_url(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_database_url_falls_back_to_generic_var() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/vitrine")]).unwrap();
        assert_eq!(
            config.require_database_url().unwrap().expose_secret(),
            "postgres://localhost/vitrine"
        );

        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/generic"),
            ("VITRINE_DATABASE_URL", "postgres://localhost/primary"),
        ])
        .unwrap();
        assert_eq!(
            config.require_database_url().unwrap().expose_secret(),
            "postgres://localhost/primary"
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("VITRINE_CURRENCY", "DOGE")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("VITRINE_INVENTORY_TTL_SECS", "soon")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("VITRINE_DATABASE_URL", "postgres://user:hunter2@db/vitrine")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_blank_checkout_phone_is_ignored() {
        let config = load(&[("VITRINE_CHECKOUT_PHONE", "  ")]).unwrap();
        assert!(config.checkout_phone.is_none());
    }
}
