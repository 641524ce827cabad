//! Cart persistence port.
//!
//! The storefront's cart store writes the whole cart after every mutation
//! and reads it back once at startup. Anything that can hold a value under a
//! fixed key can back it: a JSON file, an in-memory slot for tests, a small
//! embedded database.

use super::cart::Cart;

/// Errors reported by a [`CartStorage`] backend.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The stored value could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The backend is unusable for another reason.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value slot holding one serialized cart.
pub trait CartStorage: Send + Sync {
    /// The key the cart is stored under.
    fn key(&self) -> &str;

    /// Read the stored cart.
    ///
    /// Returns an empty cart when nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or parsed.
    fn load(&self) -> Result<Cart, StorageError>;

    /// Replace the stored cart with `cart`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or written.
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;
}
