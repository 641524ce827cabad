//! Product route handlers.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use truper_catalog_core::Product;

use super::parse_code;
use crate::error::{AppError, Result};
use crate::search::SearchResults;
use crate::state::AppState;

/// Product card data for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummaryView {
    pub code: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Number of gallery images, for the "+N" badge.
    pub image_count: usize,
    pub feature_count: usize,
}

/// Product detail data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub code: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub specifications: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub technical_specs: BTreeMap<String, String>,
    pub technical_sheet_url: Option<String>,
    pub catalog_url: Option<String>,
}

/// Product listing with search counts.
#[derive(Debug, Clone, Serialize)]
pub struct ProductsIndexView {
    pub query: String,
    pub summary: String,
    pub count: usize,
    pub total: usize,
    pub products: Vec<ProductSummaryView>,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl From<&Product> for ProductSummaryView {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.to_string(),
            key: product.key.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product
                .gallery()
                .first()
                .map_or_else(String::new, |url| (*url).to_string()),
            image_count: product.gallery().len(),
            feature_count: product.features().len(),
        }
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.to_string(),
            key: product.key.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            specifications: product.specifications.clone(),
            images: product.gallery().into_iter().map(String::from).collect(),
            features: product.features().to_vec(),
            technical_specs: product.technical_specs().cloned().unwrap_or_default(),
            technical_sheet_url: product.technical_sheet_url.clone(),
            catalog_url: product.catalog_url.clone(),
        }
    }
}

/// List products, filtered by the `q` query parameter.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<ProductsIndexView> {
    let results = SearchResults::run(state.catalog().products(), &query.q);

    Json(ProductsIndexView {
        summary: results.summary(),
        count: results.count(),
        total: results.total,
        products: results
            .products
            .iter()
            .map(|product| ProductSummaryView::from(*product))
            .collect(),
        query: results.query,
    })
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ProductView>> {
    let code = parse_code(&code)?;
    let product = state
        .catalog()
        .get(&code)
        .ok_or_else(|| AppError::NotFound(format!("product {code}")))?;

    Ok(Json(ProductView::from(product)))
}
