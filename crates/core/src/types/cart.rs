//! Cart state and the operations that mutate it.
//!
//! [`Cart`] is a pure reducer: it holds the ordered cart lines and applies
//! cart operations to them, with no knowledge of where the cart is stored.
//! Persistence is layered on top by the storefront's cart store through the
//! [`CartStorage`](super::storage::CartStorage) port.
//!
//! ## Invariants
//!
//! - Lines are kept in first-added order.
//! - At most one line exists per product code.
//! - Every line has a quantity of at least 1.

use serde::{Deserialize, Serialize, Serializer};

use super::code::ProductCode;
use super::product::Product;

/// A product and the number of units selected for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Returns the code of the product on this line.
    #[must_use]
    pub const fn code(&self) -> &ProductCode {
        &self.product.code
    }
}

/// The ordered collection of cart lines for the current session.
///
/// Serializes as a plain JSON array of `{product, quantity}` objects.
/// Deserialization normalizes the data so the invariants hold even for
/// hand-edited storage: lines with a zero quantity are dropped and repeated
/// codes are merged into their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.lines.serialize(serializer)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(line.code()) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Returns the cart lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for `code`, if present.
    #[must_use]
    pub fn get(&self, code: &ProductCode) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.code() == code)
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn distinct_products(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines, i.e. the number of individual units.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the product's code, or appends a new
    /// line with quantity 1. Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.line_mut(&product.code) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Remove the line for `code`. Returns `true` if a line was removed.
    pub fn remove(&mut self, code: &ProductCode) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.code() != code);
        self.lines.len() != before
    }

    /// Set the quantity of the line for `code`.
    ///
    /// A quantity below 1 removes the line. Absent codes are left alone; no
    /// line is created. Returns the line's quantity after the update, or
    /// `None` when no line for `code` remains.
    pub fn update_quantity(&mut self, code: &ProductCode, quantity: i64) -> Option<u32> {
        if quantity < 1 {
            self.remove(code);
            return None;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let line = self.line_mut(code)?;
        line.quantity = quantity;
        Some(quantity)
    }

    /// Add one unit to the existing line for `code`.
    pub fn increment(&mut self, code: &ProductCode) -> Option<u32> {
        let line = self.line_mut(code)?;
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    /// Take one unit off the existing line for `code`, never going below 1.
    pub fn decrement(&mut self, code: &ProductCode) -> Option<u32> {
        let line = self.line_mut(code)?;
        if line.quantity > 1 {
            line.quantity -= 1;
        }
        Some(line.quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, code: &ProductCode) -> Option<usize> {
        self.lines.iter().position(|line| line.code() == code)
    }

    fn line_mut(&mut self, code: &ProductCode) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.code() == code)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Pick the singular or plural form of a label for `count`.
#[must_use]
pub const fn pluralize<'a>(count: u64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// `"unidad"` / `"unidades"`, as used in quote messages.
#[must_use]
pub const fn unit_label(count: u64) -> &'static str {
    pluralize(count, "unidad", "unidades")
}

/// `"item"` / `"items"`, as used for the cart counter.
#[must_use]
pub const fn item_label(count: u64) -> &'static str {
    pluralize(count, "item", "items")
}
