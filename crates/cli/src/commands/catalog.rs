//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! catalogo search "martillo"
//! catalogo show 18162
//! ```

use std::io::Write;

use truper_catalog_core::{Product, ProductCode};
use truper_catalog_storefront::search::SearchResults;

use super::{CliError, Context};

/// Print the products matching `query`, one per line.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn search(ctx: &Context, query: &str, out: &mut impl Write) -> Result<(), CliError> {
    let results = SearchResults::run(ctx.catalog.products(), query);

    writeln!(out, "{}", results.summary())?;
    for product in &results.products {
        writeln!(out, "{:>8}  {:<10}  {}", product.code, product.key, product.name)?;
    }

    Ok(())
}

/// Print every detail of one product.
///
/// # Errors
///
/// Returns [`CliError::UnknownProduct`] if no product has `code`.
pub fn show(ctx: &Context, code: &ProductCode, out: &mut impl Write) -> Result<(), CliError> {
    let product = ctx
        .catalog
        .get(code)
        .ok_or_else(|| CliError::UnknownProduct(code.to_string()))?;

    write_product(product, out)
}

fn write_product(product: &Product, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", product.name)?;
    writeln!(out, "Código: {}", product.code)?;
    writeln!(out, "Clave: {}", product.key)?;
    writeln!(out)?;
    writeln!(out, "{}", product.description)?;

    if !product.specifications.is_empty() {
        writeln!(out, "Especificaciones: {}", product.specifications)?;
    }

    if !product.features().is_empty() {
        writeln!(out)?;
        writeln!(out, "Características:")?;
        for feature in product.features() {
            writeln!(out, "  - {feature}")?;
        }
    }

    if let Some(specs) = product.technical_specs() {
        writeln!(out)?;
        writeln!(out, "Especificaciones técnicas:")?;
        for (label, value) in specs {
            writeln!(out, "  {label}: {value}")?;
        }
    }

    let gallery = product.gallery();
    if !gallery.is_empty() {
        writeln!(out)?;
        for url in gallery {
            writeln!(out, "Imagen: {url}")?;
        }
    }
    if let Some(url) = &product.technical_sheet_url {
        writeln!(out, "Ficha técnica: {url}")?;
    }
    if let Some(url) = &product.catalog_url {
        writeln!(out, "Catálogo: {url}")?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use truper_catalog_storefront::catalog::Catalog;
    use truper_catalog_storefront::config::CartConfig;

    use super::*;

    fn ctx() -> Context {
        let catalog = Catalog::from_json(
            r#"[
                {"Código": "17549", "Clave": "PRT-P", "Nombre": "Pala redonda",
                 "Descripción": "Pala de acero", "Caracteristicas": ["Mango de madera"],
                 "Especificaciones_Tecnicas": {"Peso": "2.1 kg"}},
                {"Código": "15120", "Clave": "R-14", "Nombre": "Rastrillo",
                 "Descripción": "Rastrillo jardinero"}
            ]"#,
        )
        .unwrap();
        Context {
            catalog,
            cart: CartConfig {
                storage_dir: PathBuf::from("unused"),
                storage_key: "test".to_string(),
            },
        }
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_search_filters_and_summarizes() {
        let ctx = ctx();
        let text = output(|out| search(&ctx, "pala", out));

        assert!(text.starts_with("Mostrando 1 resultados para \"pala\"\n"));
        assert!(text.contains("Pala redonda"));
        assert!(!text.contains("Rastrillo"));
    }

    #[test]
    fn test_blank_search_lists_everything() {
        let ctx = ctx();
        let text = output(|out| search(&ctx, "  ", out));

        assert!(text.starts_with("Total de productos: 2\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_show_prints_details() {
        let ctx = ctx();
        let code = ProductCode::parse("17549").unwrap();
        let text = output(|out| show(&ctx, &code, out));

        assert!(text.contains("Clave: PRT-P"));
        assert!(text.contains("  - Mango de madera"));
        assert!(text.contains("  Peso: 2.1 kg"));
    }

    #[test]
    fn test_show_unknown_product() {
        let ctx = ctx();
        let code = ProductCode::parse("99999").unwrap();
        let err = show(&ctx, &code, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::UnknownProduct(c) if c == "99999"));
    }
}
