//! Quote messages built from the cart.
//!
//! A quote is a plain-text summary of the cart plus the customer's name and
//! phone, sent to the business over a WhatsApp deep link. The text layout is
//! fixed so messages look the same no matter which front end produced them.

mod whatsapp;

pub use whatsapp::{QuoteDispatcher, WHATSAPP_BASE_URL, whatsapp_url};

use truper_catalog_core::{Cart, CartLine, FormErrors, QuoteForm, unit_label};
use url::Url;

use crate::config::{DEFAULT_QUOTE_SIGNATURE, QuoteConfig};

const RULE: &str = "━━━━━━━━━━━━━━━━━━";

/// Keycap markers for positions 1 through 10.
const NUMBER_MARKERS: [&str; 10] = [
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
    "7\u{fe0f}\u{20e3}",
    "8\u{fe0f}\u{20e3}",
    "9\u{fe0f}\u{20e3}",
    "\u{1f51f}",
];

/// Why a quote could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("the cart is empty")]
    EmptyCart,
    #[error("invalid quote form: {0}")]
    Invalid(#[from] FormErrors),
    #[error("could not build the WhatsApp link: {0}")]
    Url(#[from] url::ParseError),
}

/// A formatted quote ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub message: String,
    pub url: Url,
}

/// Marker for a 1-based position: a keycap emoji up to 10, `N.` after that.
#[must_use]
pub fn number_marker(position: usize) -> String {
    position
        .checked_sub(1)
        .and_then(|i| NUMBER_MARKERS.get(i))
        .map_or_else(|| format!("{position}."), |marker| (*marker).to_string())
}

/// Render the quote message with the default signature.
#[must_use]
pub fn format_quote(lines: &[CartLine], form: &QuoteForm) -> String {
    format_quote_with_signature(lines, form, DEFAULT_QUOTE_SIGNATURE)
}

/// Render the quote message.
///
/// Items are listed in cart order. The totals are the number of distinct
/// products and the number of units.
#[must_use]
pub fn format_quote_with_signature(
    lines: &[CartLine],
    form: &QuoteForm,
    signature: &str,
) -> String {
    let total_units: u64 = lines.iter().map(|line| u64::from(line.quantity)).sum();

    let mut message = String::from("🛒 *SOLICITUD DE COTIZACIÓN*\n\n");
    message.push_str(&format!("👤 Cliente: {}\n", form.name));
    message.push_str(&format!("📱 Teléfono: {}\n\n", form.phone));
    message.push_str("📦 *PRODUCTOS SOLICITADOS:*\n");
    message.push_str(RULE);
    message.push_str("\n\n");

    for (index, line) in lines.iter().enumerate() {
        let product = &line.product;
        message.push_str(&format!("{} {}\n", number_marker(index + 1), product.name));
        message.push_str(&format!("   Código: {}\n", product.code));
        message.push_str(&format!("   Clave: {}\n", product.key));
        message.push_str(&format!(
            "   Cantidad: {} {}\n\n",
            line.quantity,
            unit_label(u64::from(line.quantity))
        ));
    }

    message.push_str(RULE);
    message.push('\n');
    message.push_str(&format!("Total de productos: {}\n", lines.len()));
    message.push_str(&format!("Total de unidades: {total_units}\n\n"));
    message.push_str(signature);

    message
}

/// Validate the form against the cart and build the quote.
///
/// # Errors
///
/// - [`QuoteError::EmptyCart`] when there is nothing to quote
/// - [`QuoteError::Invalid`] with every field error when the form is rejected
pub fn submit_quote(
    cart: &Cart,
    form: &QuoteForm,
    config: &QuoteConfig,
) -> Result<Quote, QuoteError> {
    if cart.is_empty() {
        return Err(QuoteError::EmptyCart);
    }

    let valid = form.validate()?;
    let form = QuoteForm::new(valid.name(), valid.phone());
    let message = format_quote_with_signature(cart.lines(), &form, &config.signature);
    let url = whatsapp_url(&config.whatsapp_number, &message)?;

    tracing::info!(
        products = cart.distinct_products(),
        units = cart.total_items(),
        "Quote prepared"
    );

    Ok(Quote { message, url })
}
