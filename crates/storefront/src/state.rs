//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::QuoteConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single session
/// cart; the async mutex around it keeps cart mutations strictly sequential.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    quote: QuoteConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `quote` - Quote destination and signature
    /// * `catalog` - The loaded product catalog
    /// * `cart` - The opened cart store
    #[must_use]
    pub fn new(quote: QuoteConfig, catalog: Catalog, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                quote,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get a reference to the quote configuration.
    #[must_use]
    pub fn quote_config(&self) -> &QuoteConfig {
        &self.inner.quote
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the cart store, locked for exclusive use.
    pub async fn cart(&self) -> tokio::sync::MutexGuard<'_, CartStore> {
        self.inner.cart.lock().await
    }
}
