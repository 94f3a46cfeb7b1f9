//! Policy layer (command whitelist).
//!
//! Compiles the configured whitelist into rules the gate consults before any
//! access-control lookup.

pub mod whitelist;

pub use whitelist::{CommandRule, CommandWhitelist};
