//! Catalog store for the bundled product dataset.
//!
//! The dataset is a JSON array of product records loaded once at startup
//! and held in memory, immutable, for the life of the process.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use truper_catalog_core::{Product, ProductCode};

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// In-memory product catalog, cheaply cloneable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    index: Arc<HashMap<ProductCode, usize>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// product records.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let catalog = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Loaded product catalog"
        );
        Ok(catalog)
    }

    /// Parse the catalog from a JSON array of product records.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid product array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::from_products(products))
    }

    /// Build the catalog from records already in memory.
    ///
    /// Codes are the primary key: when a code repeats, the first record is
    /// kept and later ones are skipped with a warning.
    #[must_use]
    pub fn from_products(records: Vec<Product>) -> Self {
        let mut products = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for product in records {
            if index.contains_key(&product.code) {
                tracing::warn!(code = %product.code, "Skipping duplicate product code");
                continue;
            }
            index.insert(product.code.clone(), products.len());
            products.push(product);
        }

        Self {
            products: Arc::new(products),
            index: Arc::new(index),
        }
    }

    /// Get a product by code
    #[must_use]
    pub fn get(&self, code: &ProductCode) -> Option<&Product> {
        self.index.get(code).and_then(|&i| self.products.get(i))
    }

    /// All products in dataset order
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
