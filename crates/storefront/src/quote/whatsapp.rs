//! WhatsApp deep links for quote messages.
//!
//! Dispatch is fire-and-forget: building and opening the link is all that
//! happens. Nothing confirms that a message was actually delivered.

use url::Url;

use super::Quote;

/// Base of the click-to-chat endpoint.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Build `https://wa.me/<destination>?text=<percent-encoded text>`.
///
/// Everything except unreserved characters (`A-Z a-z 0-9 - _ . ~`) is
/// percent-encoded, including spaces, newlines and emoji.
///
/// # Errors
///
/// Returns an error if `destination` does not form a valid URL path.
pub fn whatsapp_url(destination: &str, text: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(WHATSAPP_BASE_URL)?.join(destination)?;
    url.set_query(Some(&format!("text={}", urlencoding::encode(text))));
    Ok(url)
}

/// Hands a finished quote to the external messaging application.
pub trait QuoteDispatcher {
    /// Open the quote's deep link. No response is awaited.
    fn send(&self, quote: &Quote);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shape() {
        let url = whatsapp_url("50670606060", "Hola").unwrap();
        assert_eq!(url.as_str(), "https://wa.me/50670606060?text=Hola");
    }

    #[test]
    fn test_text_is_percent_encoded() {
        let url = whatsapp_url("50670606060", "🛒 *SOLICITUD*\n\nA & B").unwrap();
        assert_eq!(
            url.query(),
            Some("text=%F0%9F%9B%92%20%2ASOLICITUD%2A%0A%0AA%20%26%20B")
        );
    }

    #[test]
    fn test_encoded_text_decodes_back() {
        let text = "👤 Cliente: Ana\n📱 Teléfono: 8888-8888";
        let url = whatsapp_url("50670606060", text).unwrap();
        let (_, value) = url.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert_eq!(value, text);
    }
}
