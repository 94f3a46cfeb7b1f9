//! Transport layer (HTTP).
//!
//! Exposes the axum handlers and the error-to-response mapping.

pub mod error;
pub mod http;
