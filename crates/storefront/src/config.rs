//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WHATSAPP_BUSINESS_NUMBER` - Destination for quote messages, country code
//!   included, digits only (e.g., 50670606060)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_PATH` - Bundled product dataset (default: crates/storefront/data/productos.json)
//! - `CART_STORAGE_DIR` - Directory holding the persisted cart (default: .data)
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: truper_cart)
//! - `QUOTE_SIGNATURE` - Closing line of quote messages
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Default location of the bundled dataset, relative to the workspace root.
pub const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/productos.json";

/// Default storage key for the persisted cart.
pub const DEFAULT_CART_STORAGE_KEY: &str = "truper_cart";

/// Default closing line of quote messages.
pub const DEFAULT_QUOTE_SIGNATURE: &str = "_Enviado desde Catálogo Truper - Agro Ujarras_";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bundled dataset configuration
    pub catalog: CatalogConfig,
    /// Cart persistence configuration
    pub cart: CartConfig,
    /// Quote message configuration
    pub quote: QuoteConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Where the bundled product dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

/// Where and under which key the cart is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub storage_dir: PathBuf,
    pub storage_key: String,
}

/// Quote message destination and wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Business WhatsApp number, digits only, country code included.
    pub whatsapp_number: String,
    /// Closing line appended to every quote message.
    pub signature: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            catalog: CatalogConfig::from_env(),
            cart: CartConfig::from_env()?,
            quote: QuoteConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Load from `CATALOG_PATH`, falling back to [`DEFAULT_CATALOG_PATH`].
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            path: PathBuf::from(get_env_or_default("CATALOG_PATH", DEFAULT_CATALOG_PATH)),
        }
    }
}

impl CartConfig {
    /// Load from `CART_STORAGE_DIR` and `CART_STORAGE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not usable as a file name.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_key = get_env_or_default("CART_STORAGE_KEY", DEFAULT_CART_STORAGE_KEY);
        validate_storage_key(&storage_key, "CART_STORAGE_KEY")?;

        Ok(Self {
            storage_dir: PathBuf::from(get_env_or_default("CART_STORAGE_DIR", ".data")),
            storage_key,
        })
    }
}

impl QuoteConfig {
    /// Load from `WHATSAPP_BUSINESS_NUMBER` and `QUOTE_SIGNATURE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is missing or not digits only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let number = get_required_env("WHATSAPP_BUSINESS_NUMBER")?;
        Self::new(&number, get_optional_env("QUOTE_SIGNATURE")).map_err(|reason| {
            ConfigError::InvalidEnvVar("WHATSAPP_BUSINESS_NUMBER".to_string(), reason)
        })
    }

    /// Build a quote configuration for `number`, using the default signature
    /// when none is given.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if `number` is not a plausible
    /// international number (digits only, 8 to 15 of them, an optional
    /// leading `+` is dropped).
    pub fn new(number: &str, signature: Option<String>) -> Result<Self, String> {
        Ok(Self {
            whatsapp_number: normalize_whatsapp_number(number)?,
            signature: signature.unwrap_or_else(|| DEFAULT_QUOTE_SIGNATURE.to_string()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Strip an optional leading `+` and check the rest is 8-15 ASCII digits.
fn normalize_whatsapp_number(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("must contain only digits (got {raw:?})"));
    }
    if !(8..=15).contains(&digits.len()) {
        return Err(format!(
            "must have between 8 and 15 digits (got {})",
            digits.len()
        ));
    }
    Ok(digits.to_string())
}

/// Storage keys become file names, so keep them to a safe alphabet.
fn validate_storage_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "may only contain ASCII letters, digits, '_' and '-'".to_string(),
        ))
    }
}
