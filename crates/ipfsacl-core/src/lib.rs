//! ipfsacl core: scope and access-record model plus the shared error surface.
//!
//! This crate defines the types exchanged between the enable gate, the
//! access-control store and the prompt layer. It carries no runtime or
//! transport dependencies so the model can be reused by hosts that embed the
//! gate directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed page URLs and permission strings surface as `AclError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{AclError, ClientCode, Result};
pub use model::{AccessRecord, EnableOpts, Permission, PermissionTarget, PromptDecision, Scope};
