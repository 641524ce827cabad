//! Quote route handlers.

use axum::{Form, Json, extract::State, response::Redirect};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use truper_catalog_core::QuoteForm;

use crate::error::{Result, add_breadcrumb};
use crate::quote::{Quote, submit_quote};
use crate::state::AppState;

/// Quote request form data.
#[derive(Debug, Deserialize)]
pub struct QuoteRequestForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Empty the cart once the quote is built.
    #[serde(default)]
    pub clear_cart: bool,
}

/// A built quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    pub message: String,
    pub url: String,
}

impl From<Quote> for QuoteView {
    fn from(quote: Quote) -> Self {
        Self {
            message: quote.message,
            url: quote.url.into(),
        }
    }
}

/// Validate, format and optionally clear the cart, all under one lock.
async fn prepare(state: &AppState, form: QuoteRequestForm) -> Result<Quote> {
    let mut store = state.cart().await;
    let quote = submit_quote(
        store.cart(),
        &QuoteForm::new(form.name, form.phone),
        state.quote_config(),
    )?;

    add_breadcrumb("quote", "Quote prepared", None);
    if form.clear_cart {
        store.clear_cart();
    }

    Ok(quote)
}

/// Build the quote and return it with its WhatsApp link.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<QuoteRequestForm>,
) -> Result<Json<QuoteView>> {
    let quote = prepare(&state, form).await?;
    Ok(Json(QuoteView::from(quote)))
}

/// Build the quote and redirect the browser to WhatsApp.
#[instrument(skip(state, form))]
pub async fn checkout(
    State(state): State<AppState>,
    Form(form): Form<QuoteRequestForm>,
) -> Result<Redirect> {
    let quote = prepare(&state, form).await?;
    Ok(Redirect::to(quote.url.as_str()))
}
