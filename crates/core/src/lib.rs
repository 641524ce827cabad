//! Truper Catalog Core - Shared types library.
//!
//! This crate provides common types used across all catalog components:
//! - `storefront` - HTTP storefront serving the catalog, cart and quotes
//! - `cli` - Command-line front end over the same catalog and cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no file access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, the cart reducer, the quote form and the
//!   cart persistence port

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
