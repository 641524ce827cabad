//! Cart store: the session cart plus its persistence.
//!
//! [`CartStore`] owns the [`Cart`] and a [`CartStorage`] backend. It reads the
//! stored cart once when opened and writes the whole cart back after every
//! mutation. Storage failures never reach the caller: a failed read starts
//! an empty cart, a failed write is logged and the in-memory cart stays
//! authoritative for the rest of the session.
//!
//! The store is not synchronized. Callers that share it between tasks wrap
//! it in a mutex so mutations stay strictly sequential.

mod storage;

pub use storage::{FileCartStorage, MemoryCartStorage};

use truper_catalog_core::{Cart, CartLine, CartStorage, Product, ProductCode};

/// The session cart, persisted after every change.
pub struct CartStore {
    cart: Cart,
    storage: Box<dyn CartStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("storage_key", &self.storage.key())
            .finish()
    }
}

impl CartStore {
    /// Open the store, rehydrating the cart from `storage`.
    ///
    /// Any read or parse failure is logged and yields an empty cart.
    pub fn open(storage: impl CartStorage + 'static) -> Self {
        Self::with_storage(Box::new(storage))
    }

    /// Like [`Self::open`], for an already boxed backend.
    #[must_use]
    pub fn with_storage(storage: Box<dyn CartStorage>) -> Self {
        let cart = match storage.load() {
            Ok(cart) => {
                tracing::debug!(
                    key = storage.key(),
                    lines = cart.distinct_products(),
                    "Loaded cart from storage"
                );
                cart
            }
            Err(e) => {
                tracing::error!(key = storage.key(), error = %e, "Error loading cart from storage");
                Cart::new()
            }
        };

        Self { cart, storage }
    }

    /// Returns the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the cart lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn distinct_products(&self) -> usize {
        self.cart.distinct_products()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one unit of `product`. Returns the line's new quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> u32 {
        let quantity = self.cart.add(product);
        self.persist();
        quantity
    }

    /// Remove the line for `code`, if present.
    pub fn remove_from_cart(&mut self, code: &ProductCode) -> bool {
        let removed = self.cart.remove(code);
        self.persist();
        removed
    }

    /// Set the quantity for `code`; below 1 removes the line.
    pub fn update_quantity(&mut self, code: &ProductCode, quantity: i64) -> Option<u32> {
        let updated = self.cart.update_quantity(code, quantity);
        self.persist();
        updated
    }

    /// Add one unit to an existing line.
    pub fn increment(&mut self, code: &ProductCode) -> Option<u32> {
        let updated = self.cart.increment(code);
        self.persist();
        updated
    }

    /// Take one unit off an existing line, keeping at least one.
    pub fn decrement(&mut self, code: &ProductCode) -> Option<u32> {
        let updated = self.cart.decrement(code);
        self.persist();
        updated
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.cart) {
            tracing::error!(key = self.storage.key(), error = %e, "Error saving cart to storage");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use truper_catalog_core::StorageError;

    use super::*;

    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn key(&self) -> &'static str {
            "broken"
        }

        fn load(&self) -> Result<Cart, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        fn save(&self, _cart: &Cart) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
    }

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    fn product(c: &str, name: &str) -> Product {
        Product::new(code(c), c, name, "")
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = MemoryCartStorage::new("truper_cart");
        let mut store = CartStore::open(storage.clone());

        store.add_to_cart(&product("P1", "Pala"));
        assert_eq!(storage.load().unwrap().total_items(), 1);

        store.add_to_cart(&product("P1", "Pala"));
        store.add_to_cart(&product("P2", "Rastrillo"));
        assert_eq!(storage.load().unwrap().total_items(), 3);

        store.update_quantity(&code("P2"), 5);
        assert_eq!(storage.load().unwrap().total_items(), 7);

        store.remove_from_cart(&code("P1"));
        assert_eq!(storage.load().unwrap().distinct_products(), 1);

        store.clear_cart();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_restores_lines_in_order() {
        let storage = MemoryCartStorage::new("truper_cart");
        let mut store = CartStore::open(storage.clone());
        store.add_to_cart(&product("P2", "Rastrillo"));
        store.add_to_cart(&product("P1", "Pala"));
        store.update_quantity(&code("P2"), 3);

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.cart(), store.cart());
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let storage = MemoryCartStorage::with_contents("truper_cart", "{not json");
        let store = CartStore::open(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_failing_storage_keeps_in_memory_state() {
        let mut store = CartStore::open(BrokenStorage);
        assert!(store.is_empty());

        store.add_to_cart(&product("P1", "Pala"));
        store.add_to_cart(&product("P1", "Pala"));

        assert_eq!(store.total_items(), 2);
        assert_eq!(store.lines().first().unwrap().quantity, 2);
    }

    #[test]
    fn test_update_absent_code_does_not_create_line() {
        let mut store = CartStore::open(MemoryCartStorage::new("truper_cart"));
        assert_eq!(store.update_quantity(&code("P9"), 3), None);
        assert!(store.is_empty());
    }
}
