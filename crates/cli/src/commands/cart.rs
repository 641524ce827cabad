//! Cart commands.
//!
//! Each mutation is persisted by the store before the command returns.
//!
//! # Usage
//!
//! ```bash
//! catalogo cart add 17549
//! catalogo cart increment 17549
//! catalogo cart update 17549 0   # removes the line
//! catalogo cart list
//! ```

use std::io::Write;

use truper_catalog_core::{ProductCode, item_label, unit_label};
use truper_catalog_storefront::cart::CartStore;

use super::{CliError, Context};

/// Print every cart line and the totals.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list(store: &CartStore, out: &mut impl Write) -> Result<(), CliError> {
    if store.is_empty() {
        writeln!(out, "El carrito está vacío")?;
        return Ok(());
    }

    for line in store.lines() {
        writeln!(
            out,
            "{:>8}  {:<10}  {}  x{} {}",
            line.product.code,
            line.product.key,
            line.product.name,
            line.quantity,
            unit_label(u64::from(line.quantity))
        )?;
    }

    let total = store.total_items();
    writeln!(
        out,
        "{} productos, {total} {}",
        store.distinct_products(),
        item_label(total)
    )?;
    Ok(())
}

/// Print the total number of units.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn count(store: &CartStore, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", store.total_items())?;
    Ok(())
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns [`CliError::UnknownProduct`] if the catalog has no such product.
pub fn add(
    ctx: &Context,
    store: &mut CartStore,
    code: &ProductCode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let product = ctx
        .catalog
        .get(code)
        .ok_or_else(|| CliError::UnknownProduct(code.to_string()))?;

    let quantity = store.add_to_cart(product);
    tracing::info!(%code, quantity, "Added product to cart");
    writeln!(out, "{}: {quantity} {}", product.name, unit_label(u64::from(quantity)))?;
    Ok(())
}

/// Set a line's quantity. Values below 1 remove the line.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the cart has no such line.
pub fn update(
    store: &mut CartStore,
    code: &ProductCode,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if store.cart().get(code).is_none() {
        return Err(CliError::NotInCart(code.to_string()));
    }

    match store.update_quantity(code, quantity) {
        Some(quantity) => report_quantity(code, quantity, out),
        None => {
            writeln!(out, "{code}: eliminado")?;
            Ok(())
        }
    }
}

/// Add one unit to an existing line.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the cart has no such line.
pub fn increment(
    store: &mut CartStore,
    code: &ProductCode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let quantity = store
        .increment(code)
        .ok_or_else(|| CliError::NotInCart(code.to_string()))?;
    report_quantity(code, quantity, out)
}

/// Take one unit off an existing line, never going below one.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the cart has no such line.
pub fn decrement(
    store: &mut CartStore,
    code: &ProductCode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let quantity = store
        .decrement(code)
        .ok_or_else(|| CliError::NotInCart(code.to_string()))?;
    report_quantity(code, quantity, out)
}

/// Remove a line.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the cart has no such line.
pub fn remove(
    store: &mut CartStore,
    code: &ProductCode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if !store.remove_from_cart(code) {
        return Err(CliError::NotInCart(code.to_string()));
    }
    writeln!(out, "{code}: eliminado")?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear(store: &mut CartStore, out: &mut impl Write) -> Result<(), CliError> {
    store.clear_cart();
    writeln!(out, "Carrito vaciado")?;
    Ok(())
}

fn report_quantity(
    code: &ProductCode,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), CliError> {
    writeln!(out, "{code}: {quantity} {}", unit_label(u64::from(quantity)))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use truper_catalog_storefront::cart::MemoryCartStorage;
    use truper_catalog_storefront::catalog::Catalog;
    use truper_catalog_storefront::config::CartConfig;

    use super::*;

    fn ctx() -> Context {
        let catalog = Catalog::from_json(
            r#"[
                {"Código": "17549", "Clave": "PRT-P", "Nombre": "Pala redonda"},
                {"Código": "15120", "Clave": "R-14", "Nombre": "Rastrillo"}
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

    fn code(raw: &str) -> ProductCode {
        ProductCode::parse(raw).unwrap()
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_then_list() {
        let ctx = ctx();
        let storage = MemoryCartStorage::new("test");
        let mut store = CartStore::open(storage.clone());

        let mut out = Vec::new();
        add(&ctx, &mut store, &code("17549"), &mut out).unwrap();
        add(&ctx, &mut store, &code("17549"), &mut out).unwrap();
        add(&ctx, &mut store, &code("15120"), &mut out).unwrap();
        assert_eq!(
            text(out),
            "Pala redonda: 1 unidad\nPala redonda: 2 unidades\nRastrillo: 1 unidad\n"
        );

        let mut out = Vec::new();
        list(&store, &mut out).unwrap();
        let listing = text(out);
        assert!(listing.contains("Pala redonda  x2 unidades"));
        assert!(listing.ends_with("2 productos, 3 items\n"));

        assert!(storage.contents().unwrap().contains("17549"));
    }

    #[test]
    fn test_add_unknown_product() {
        let ctx = ctx();
        let mut store = CartStore::open(MemoryCartStorage::new("test"));
        let err = add(&ctx, &mut store, &code("99999"), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::UnknownProduct(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let ctx = ctx();
        let mut store = CartStore::open(MemoryCartStorage::new("test"));
        add(&ctx, &mut store, &code("17549"), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        update(&mut store, &code("17549"), 0, &mut out).unwrap();
        assert_eq!(text(out), "17549: eliminado\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_line_errors() {
        let mut store = CartStore::open(MemoryCartStorage::new("test"));
        let missing = code("17549");

        assert!(matches!(
            update(&mut store, &missing, 3, &mut Vec::new()),
            Err(CliError::NotInCart(_))
        ));
        assert!(matches!(
            increment(&mut store, &missing, &mut Vec::new()),
            Err(CliError::NotInCart(_))
        ));
        assert!(matches!(
            remove(&mut store, &missing, &mut Vec::new()),
            Err(CliError::NotInCart(_))
        ));
    }

    #[test]
    fn test_decrement_keeps_one() {
        let ctx = ctx();
        let mut store = CartStore::open(MemoryCartStorage::new("test"));
        add(&ctx, &mut store, &code("17549"), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        decrement(&mut store, &code("17549"), &mut out).unwrap();
        assert_eq!(text(out), "17549: 1 unidad\n");
    }

    #[test]
    fn test_list_and_count_empty() {
        let store = CartStore::open(MemoryCartStorage::new("test"));

        let mut out = Vec::new();
        list(&store, &mut out).unwrap();
        assert_eq!(text(out), "El carrito está vacío\n");

        let mut out = Vec::new();
        count(&store, &mut out).unwrap();
        assert_eq!(text(out), "0\n");
    }
}
