//! CLI command implementations.
//!
//! Commands write their output to the writer they are given, so tests can
//! capture it.

pub mod cart;
pub mod catalog;
pub mod quote;

use thiserror::Error;
use truper_catalog_storefront::{
    cart::{CartStore, FileCartStorage},
    catalog::{Catalog, CatalogError},
    config::{CartConfig, CatalogConfig, ConfigError},
    quote::QuoteError,
};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The product dataset could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// No catalog product has this code.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The cart has no line for this code.
    #[error("Product {0} is not in the cart")]
    NotInCart(String),

    /// The quote could not be built.
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// The `--to` number was rejected.
    #[error("Invalid WhatsApp number: {0}")]
    InvalidNumber(String),

    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Catalog and cart locations shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub catalog: Catalog,
    pub cart: CartConfig,
}

impl Context {
    /// Load the catalog and cart settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart settings are invalid or the dataset
    /// cannot be read.
    pub fn from_env() -> Result<Self, CliError> {
        dotenvy::dotenv().ok();

        let catalog_config = CatalogConfig::from_env();
        Ok(Self {
            catalog: Catalog::load(&catalog_config.path)?,
            cart: CartConfig::from_env()?,
        })
    }

    /// Open the persisted cart.
    #[must_use]
    pub fn open_cart(&self) -> CartStore {
        CartStore::open(FileCartStorage::new(
            &self.cart.storage_dir,
            &self.cart.storage_key,
        ))
    }
}
