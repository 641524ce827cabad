//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added by the binary)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fills the span field and tags the response)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
