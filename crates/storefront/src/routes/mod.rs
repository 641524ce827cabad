//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products?q=            - Product listing, filtered by free text
//! GET  /products/{code}        - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart contents
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add one unit (triggers cart-updated)
//! POST /cart/update            - Set quantity, below 1 removes
//! POST /cart/increment         - One more unit
//! POST /cart/decrement         - One less unit, never below 1
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Quote
//! POST /quote                  - Build the quote message and WhatsApp link
//! POST /checkout               - Redirect to the WhatsApp link
//! ```

pub mod cart;
pub mod products;
pub mod quote;

use axum::{
    Router,
    routing::{get, post},
};
use truper_catalog_core::ProductCode;

use crate::error::AppError;
use crate::state::AppState;

/// Parse a product code from user input.
pub(crate) fn parse_code(raw: &str) -> Result<ProductCode, AppError> {
    ProductCode::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{code}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/quote", post(quote::create))
        .route("/checkout", post(quote::checkout))
}
