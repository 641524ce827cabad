//! Integration tests for the Truper catalog storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p truper-catalog-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_http` - Routes driven through the full router
//! - `cart_persistence` - Cart state surviving a restart
//! - `quote_flow` - Quote building and WhatsApp links
//!
//! Requests are served in-process with `tower::ServiceExt::oneshot`, so no
//! server has to be running. Each [`TestContext`] persists its cart in its
//! own temporary directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use truper_catalog_storefront::{
    cart::{CartStore, FileCartStorage},
    catalog::Catalog,
    config::QuoteConfig,
    router,
    state::AppState,
};

/// Business number used by every test context.
pub const TEST_WHATSAPP_NUMBER: &str = "50670606060";

/// Storage key used by every test context.
pub const TEST_STORAGE_KEY: &str = "truper_cart";

/// Catalog shared by the tests.
pub const TEST_CATALOG: &str = r#"[
    {
        "Código": "17549",
        "Clave": "PRT-P",
        "Nombre": "Pala redonda puño Y",
        "Descripción": "Pala redonda de acero templado",
        "URL_Imagen": "https://example.com/17549.jpg",
        "Caracteristicas": ["Cabeza de acero templado"]
    },
    {
        "Código": "15120",
        "Clave": "R-14",
        "Nombre": "Rastrillo jardinero",
        "Descripción": "Rastrillo de acero con 14 dientes"
    },
    {
        "Código": "18162",
        "Clave": "MAR-16",
        "Nombre": "Martillo de uña",
        "Descripción": "Martillo con mango de fibra de vidrio",
        "Imagenes": ["https://example.com/18162-a.jpg", "https://example.com/18162-b.jpg"],
        "Especificaciones_Tecnicas": {"Peso": "16 oz"}
    }
]"#;

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// The body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// A header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A storefront router backed by a temporary cart directory.
pub struct TestContext {
    dir: TempDir,
    catalog: Catalog,
    app: Router,
}

impl TestContext {
    /// Build a fresh storefront with an empty cart.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::from_json(TEST_CATALOG).unwrap();
        let app = build_app(dir.path(), &catalog);
        Self { dir, catalog, app }
    }

    /// Simulate a restart: a new router reading the same cart file.
    #[must_use]
    pub fn restart(self) -> Self {
        let app = build_app(self.dir.path(), &self.catalog);
        Self { app, ..self }
    }

    /// Directory the cart file lives in.
    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the persisted cart file.
    #[must_use]
    pub fn cart_file(&self) -> PathBuf {
        FileCartStorage::new(self.dir.path(), TEST_STORAGE_KEY)
            .path()
            .to_path_buf()
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty())).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
        )
        .await
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&self, request: Result<Request<Body>, axum::http::Error>) -> TestResponse {
        let response = self.app.clone().oneshot(request.unwrap()).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::unwrap_used)]
fn build_app(dir: &Path, catalog: &Catalog) -> Router {
    let cart = CartStore::open(FileCartStorage::new(dir, TEST_STORAGE_KEY));
    let quote = QuoteConfig::new(TEST_WHATSAPP_NUMBER, None).unwrap();
    router(AppState::new(quote, catalog.clone(), cart))
}
