//! Free-text product search.
//!
//! Matching is a case-insensitive substring test against a composite text
//! built from each product's code, key, name and description. Nothing is
//! tokenized or ranked: results keep catalog order.

use truper_catalog_core::Product;

/// Separator between the fields of the composite searchable text.
///
/// Keeps a query from matching across the boundary of two fields.
const FIELD_SEPARATOR: char = '\n';

/// Build the lower-cased composite text a query is matched against.
///
/// Fields appear in a fixed order: code, key, name, description.
#[must_use]
pub fn searchable_text(product: &Product) -> String {
    let mut text = String::with_capacity(
        product.code.as_str().len()
            + product.key.len()
            + product.name.len()
            + product.description.len()
            + 3,
    );
    text.push_str(product.code.as_str());
    text.push(FIELD_SEPARATOR);
    text.push_str(&product.key);
    text.push(FIELD_SEPARATOR);
    text.push_str(&product.name);
    text.push(FIELD_SEPARATOR);
    text.push_str(&product.description);
    text.to_lowercase()
}

/// Trim and lower-case a raw query. Returns `None` for a blank query.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Filter `products` by a free-text query, preserving their order.
///
/// A blank query returns every product.
#[must_use]
pub fn filter<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let Some(needle) = normalize_query(query) else {
        return products.iter().collect();
    };

    products
        .iter()
        .filter(|product| searchable_text(product).contains(&needle))
        .collect()
}

/// A filtered view of the catalog together with the counts shown above it.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    /// The query as typed, untrimmed.
    pub query: String,
    /// Matching products in catalog order.
    pub products: Vec<&'a Product>,
    /// Size of the unfiltered catalog.
    pub total: usize,
}

impl<'a> SearchResults<'a> {
    /// Run `query` against `products`.
    #[must_use]
    pub fn run(products: &'a [Product], query: &str) -> Self {
        Self {
            query: query.to_string(),
            products: filter(products, query),
            total: products.len(),
        }
    }

    /// Returns `true` if a non-blank query narrowed the list.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        normalize_query(&self.query).is_some()
    }

    /// Number of products in the filtered view.
    #[must_use]
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// One-line summary for the top of the listing.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_filtered() {
            format!(
                "Mostrando {} resultados para \"{}\"",
                self.count(),
                self.query
            )
        } else {
            format!("Total de productos: {}", self.total)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use truper_catalog_core::ProductCode;

    use super::*;

    fn product(code: &str, key: &str, name: &str, description: &str) -> Product {
        Product::new(ProductCode::parse(code).unwrap(), key, name, description)
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("17549", "PRL-P", "Pala redonda", "Puño Y, mango de madera"),
            product("15031", "R-14", "Rastrillo", "Rastrillo de 14 dientes"),
            product("10243", "MAR-16", "Martillo", "Martillo uña curva"),
        ]
    }

    fn codes<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.code.as_str()).collect()
    }

    #[test]
    fn test_blank_query_returns_everything_in_order() {
        let products = catalog();
        for query in ["", "   ", "\t\n"] {
            assert_eq!(codes(&filter(&products, query)), vec!["17549", "15031", "10243"]);
        }
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let products = catalog();
        assert_eq!(codes(&filter(&products, "  PALA ")), vec!["17549"]);
    }

    #[test]
    fn test_matches_code_key_and_description() {
        let products = catalog();
        assert_eq!(codes(&filter(&products, "150")), vec!["15031"]);
        assert_eq!(codes(&filter(&products, "mar-16")), vec!["10243"]);
        assert_eq!(codes(&filter(&products, "dientes")), vec!["15031"]);
    }

    #[test]
    fn test_non_ascii_query() {
        let products = catalog();
        assert_eq!(codes(&filter(&products, "PUÑO")), vec!["17549"]);
    }

    #[test]
    fn test_does_not_match_across_fields() {
        let products = catalog();
        assert!(filter(&products, "17549prl").is_empty());
    }

    #[test]
    fn test_results_partition_catalog() {
        let products = catalog();
        for query in ["a", "ma", "rastrillo", "zzz", "1"] {
            let needle = normalize_query(query).unwrap();
            let matched = filter(&products, query);
            for p in &products {
                let included = matched.iter().any(|m| m.code == p.code);
                assert_eq!(included, searchable_text(p).contains(&needle));
            }
        }
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter(&[], "pala").is_empty());
        assert!(filter(&[], "").is_empty());
    }

    #[test]
    fn test_summary() {
        let products = catalog();

        let all = SearchResults::run(&products, " ");
        assert!(!all.is_filtered());
        assert_eq!(all.summary(), "Total de productos: 3");

        let some = SearchResults::run(&products, "martillo");
        assert_eq!(some.count(), 1);
        assert_eq!(some.summary(), "Mostrando 1 resultados para \"martillo\"");
    }
}
