//! Access-control model.
//!
//! - `scope`: normalized identity of the calling page (origin + directory).
//! - `access`: permissions, access records, prompt decisions and enable options.
//!
//! Constructors validate their input and report `AclError::BadRequest`
//! instead of panicking, since scopes and permission names arrive from pages.

pub mod access;
pub mod scope;

pub use access::{AccessRecord, EnableOpts, Permission, PermissionTarget, PromptDecision};
pub use scope::Scope;
