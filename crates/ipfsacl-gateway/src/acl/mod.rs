//! Access-control store.
//!
//! Records are keyed by scope; a lookup is answered by the longest stored
//! scope that contains the requested one. Records are only written after a
//! user decision (or by explicit revocation through the admin routes).

pub mod memory;

use async_trait::async_trait;

use ipfsacl_core::error::Result;
use ipfsacl_core::model::{AccessRecord, PermissionTarget, Scope};

pub use memory::MemoryAccessControl;

#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Current decision for `command`, if any. A `*` record of the matching
    /// scope wins over the individual entry.
    async fn get_access(&self, scope: &Scope, command: &str) -> Result<Option<AccessRecord>>;

    /// Persist one decision for every permission in `target`.
    async fn set_access(
        &self,
        scope: &Scope,
        target: PermissionTarget,
        allow: bool,
    ) -> Result<AccessRecord>;

    /// Remove one permission (or, with `None`, the whole scope).
    /// Returns false when nothing was stored.
    async fn revoke_access(&self, scope: &Scope, permission: Option<&str>) -> Result<bool>;

    /// Every scope that has at least one record.
    async fn scopes(&self) -> Result<Vec<Scope>>;

    /// Records stored under exactly `scope`.
    async fn all_access(&self, scope: &Scope) -> Result<Vec<AccessRecord>>;
}
