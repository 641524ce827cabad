//! Quote command.
//!
//! # Usage
//!
//! ```bash
//! catalogo quote -n "Juan Pérez" -p 8888-8888
//! catalogo quote -n "Juan Pérez" -p 88888888 --to 50670606060 --clear
//! ```
//!
//! # Environment Variables
//!
//! - `WHATSAPP_BUSINESS_NUMBER` - Destination number, unless `--to` is given
//! - `QUOTE_SIGNATURE` - Closing line of the message

use std::io::Write;

use truper_catalog_core::QuoteForm;
use truper_catalog_storefront::{
    cart::CartStore,
    config::QuoteConfig,
    quote::{Quote, QuoteDispatcher, submit_quote},
};

use super::CliError;

/// Prints the quote message and its WhatsApp link to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDispatcher;

impl QuoteDispatcher for StdoutDispatcher {
    fn send(&self, quote: &Quote) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = write_quote(quote, &mut out) {
            tracing::warn!(error = %e, "Could not print quote");
        }
    }
}

/// Write the message, a blank line, then the link.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn write_quote(quote: &Quote, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", quote.message)?;
    writeln!(out)?;
    writeln!(out, "{}", quote.url)
}

/// Pick the destination: `--to` when given, the environment otherwise.
///
/// # Errors
///
/// Returns an error if the number is missing or malformed.
pub fn resolve_config(to: Option<&str>) -> Result<QuoteConfig, CliError> {
    match to {
        Some(number) => {
            let signature = std::env::var("QUOTE_SIGNATURE").ok().filter(|s| !s.is_empty());
            QuoteConfig::new(number, signature).map_err(CliError::InvalidNumber)
        }
        None => Ok(QuoteConfig::from_env()?),
    }
}

/// Build the quote for the current cart and hand it to `dispatcher`.
///
/// The cart is emptied afterwards only when `clear` is set and the quote
/// was built.
///
/// # Errors
///
/// Returns [`CliError::Quote`] if the cart is empty or the form is invalid.
pub fn run(
    store: &mut CartStore,
    name: &str,
    phone: &str,
    config: &QuoteConfig,
    clear: bool,
    dispatcher: &impl QuoteDispatcher,
) -> Result<Quote, CliError> {
    let quote = submit_quote(store.cart(), &QuoteForm::new(name, phone), config)?;
    dispatcher.send(&quote);

    if clear {
        store.clear_cart();
    }

    Ok(quote)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use truper_catalog_core::{FieldError, FormField, Product, ProductCode};
    use truper_catalog_storefront::cart::MemoryCartStorage;
    use truper_catalog_storefront::quote::QuoteError;

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Quote>>);

    impl QuoteDispatcher for Recorder {
        fn send(&self, quote: &Quote) {
            self.0.borrow_mut().push(quote.clone());
        }
    }

    fn config() -> QuoteConfig {
        QuoteConfig::new("50670606060", None).unwrap()
    }

    fn store_with_pala() -> CartStore {
        let mut store = CartStore::open(MemoryCartStorage::new("test"));
        let code = ProductCode::parse("17549").unwrap();
        store.add_to_cart(&Product::new(code, "PRT-P", "Pala redonda", ""));
        store
    }

    #[test]
    fn test_run_dispatches_and_clears() {
        let mut store = store_with_pala();
        let recorder = Recorder::default();

        let quote = run(&mut store, "Ana", "8888-8888", &config(), true, &recorder).unwrap();

        assert!(quote.url.as_str().starts_with("https://wa.me/50670606060?text="));
        assert_eq!(recorder.0.borrow().len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_run_keeps_cart_without_clear() {
        let mut store = store_with_pala();
        run(&mut store, "Ana", "88888888", &config(), false, &Recorder::default()).unwrap();
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let mut store = store_with_pala();
        let recorder = Recorder::default();

        let err = run(&mut store, "Ana", "123", &config(), true, &recorder).unwrap_err();

        let CliError::Quote(QuoteError::Invalid(errors)) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            errors.get(FormField::Phone),
            Some(FieldError::InvalidPhoneFormat)
        );
        assert!(recorder.0.borrow().is_empty());
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_write_quote_layout() {
        let mut store = store_with_pala();
        let quote = run(&mut store, "Ana", "88888888", &config(), false, &Recorder::default())
            .unwrap();

        let mut buf = Vec::new();
        write_quote(&quote, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("🛒 *SOLICITUD DE COTIZACIÓN*\n"));
        assert!(text.ends_with(&format!("\n\n{}\n", quote.url)));
    }

    #[test]
    fn test_resolve_config_rejects_bad_number() {
        assert!(matches!(
            resolve_config(Some("12ab")),
            Err(CliError::InvalidNumber(_))
        ));
        assert_eq!(
            resolve_config(Some("+50670606060")).unwrap().whatsapp_number,
            "50670606060"
        );
    }
}
