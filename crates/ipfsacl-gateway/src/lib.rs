//! ipfsacl gateway library entry.
//!
//! Wires configuration, the command whitelist, the access-control store, the
//! prompt layer and the proxy gate behind an HTTP surface. It is consumed by
//! the binary (`main.rs`) and by integration tests; hosts can also embed
//! [`gate::ProxyGate`] directly with their own store and prompt.

pub mod acl;
pub mod app_state;
pub mod config;
pub mod context;
pub mod gate;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod prompt;
pub mod router;
pub mod transport;
