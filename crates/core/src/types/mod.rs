//! Core types for the catalog.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod cart;
pub mod code;
pub mod product;
pub mod quote;
pub mod storage;

pub use cart::{Cart, CartLine, item_label, pluralize, unit_label};
pub use code::{ProductCode, ProductCodeError};
pub use product::Product;
pub use quote::{FieldError, FormErrors, FormField, QuoteForm, ValidQuoteForm, is_valid_phone};
pub use storage::{CartStorage, StorageError};
