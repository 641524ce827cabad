//! Cart route handlers.
//!
//! Every mutation answers with the updated cart and an `HX-Trigger:
//! cart-updated` header so the page can refresh its cart badge.

use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use truper_catalog_core::{Cart, CartLine, item_label, unit_label};

use super::parse_code;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub code: String,
    pub key: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub unit_label: &'static str,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub distinct_products: usize,
    pub total_items: u64,
    pub item_label: &'static str,
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub count: u64,
    pub label: &'static str,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            code: line.product.code.to_string(),
            key: line.product.key.clone(),
            name: line.product.name.clone(),
            image_url: line
                .product
                .gallery()
                .first()
                .map_or_else(String::new, |url| (*url).to_string()),
            quantity: line.quantity,
            unit_label: unit_label(u64::from(line.quantity)),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total_items = cart.total_items();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            distinct_products: cart.distinct_products(),
            total_items,
            item_label: item_label(total_items),
        }
    }
}

/// Form data naming a product.
#[derive(Debug, Deserialize)]
pub struct CodeForm {
    pub code: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub code: String,
    pub quantity: i64,
}

/// Respond with the updated cart and the refresh trigger.
fn updated(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        Json(CartView::from(cart)),
    )
        .into_response()
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let store = state.cart().await;
    Json(CartView::from(store.cart()))
}

/// Get the cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCountView> {
    let count = state.cart().await.total_items();
    Json(CartCountView {
        count,
        label: item_label(count),
    })
}

/// Add one unit of a catalog product.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<CodeForm>) -> Result<Response> {
    let code = parse_code(&form.code)?;
    let product = state
        .catalog()
        .get(&code)
        .ok_or_else(|| AppError::NotFound(format!("product {code}")))?;

    let mut store = state.cart().await;
    let quantity = store.add_to_cart(product);
    add_breadcrumb("cart", "Added product", Some(&[("code", code.as_str())]));
    tracing::info!(%code, quantity, "Added product to cart");

    Ok(updated(store.cart()))
}

/// Set a line's quantity; below 1 removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let code = parse_code(&form.code)?;
    let mut store = state.cart().await;
    store.update_quantity(&code, form.quantity);
    Ok(updated(store.cart()))
}

/// Add one unit to an existing line.
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Form(form): Form<CodeForm>,
) -> Result<Response> {
    let code = parse_code(&form.code)?;
    let mut store = state.cart().await;
    store.increment(&code);
    Ok(updated(store.cart()))
}

/// Take one unit off an existing line, keeping at least one.
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Form(form): Form<CodeForm>,
) -> Result<Response> {
    let code = parse_code(&form.code)?;
    let mut store = state.cart().await;
    store.decrement(&code);
    Ok(updated(store.cart()))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<CodeForm>) -> Result<Response> {
    let code = parse_code(&form.code)?;
    let mut store = state.cart().await;
    store.remove_from_cart(&code);
    Ok(updated(store.cart()))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    let mut store = state.cart().await;
    store.clear_cart();
    add_breadcrumb("cart", "Cleared cart", None);
    updated(store.cart())
}
