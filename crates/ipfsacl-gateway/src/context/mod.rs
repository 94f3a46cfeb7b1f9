//! Request context shared across layers.
//!
//! Resolves the scope of the page a request is made for, without coupling the
//! gate to transport specifics.

pub mod scope;

pub use scope::{HeaderScope, ScopeResolver, PAGE_URL_HEADER};
