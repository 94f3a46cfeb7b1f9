use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use ipfsacl_core::error::Result;
use ipfsacl_core::model::{AccessRecord, Permission, PermissionTarget, Scope};

use super::AccessControl;

/// In-process access-control list.
///
/// `scope -> (permission -> allow)`. Durable storage is left to embedders
/// implementing [`AccessControl`] themselves.
#[derive(Default)]
pub struct MemoryAccessControl {
    scopes: DashMap<Scope, BTreeMap<Permission, bool>>,
}

impl MemoryAccessControl {
    pub fn new() -> Self {
        Self {
            scopes: DashMap::new(),
        }
    }

    /// Stored scopes containing `scope`, longest first.
    fn containing_scopes(&self, scope: &Scope) -> Vec<Scope> {
        let mut out: Vec<Scope> = self
            .scopes
            .iter()
            .filter(|e| e.key().contains(scope))
            .map(|e| e.key().clone())
            .collect();
        out.sort_by_key(|s| std::cmp::Reverse(s.as_str().len()));
        out
    }
}

#[async_trait]
impl AccessControl for MemoryAccessControl {
    async fn get_access(&self, scope: &Scope, command: &str) -> Result<Option<AccessRecord>> {
        let wanted = Permission::from(command);

        // A scope without an entry for `command` defers to the next shorter one.
        for candidate in self.containing_scopes(scope) {
            let Some(entries) = self.scopes.get(&candidate) else {
                continue;
            };
            let hit = entries
                .get(&Permission::All)
                .map(|allow| (Permission::All, *allow))
                .or_else(|| entries.get(&wanted).map(|allow| (wanted.clone(), *allow)));

            if let Some((permission, allow)) = hit {
                return Ok(Some(AccessRecord {
                    scope: candidate.clone(),
                    permissions: vec![permission],
                    allow,
                }));
            }
        }
        Ok(None)
    }

    async fn set_access(
        &self,
        scope: &Scope,
        target: PermissionTarget,
        allow: bool,
    ) -> Result<AccessRecord> {
        let permissions = target.permissions();
        let mut entries = self.scopes.entry(scope.clone()).or_default();

        if permissions.iter().any(Permission::is_wildcard) {
            entries.clear();
        }
        for p in &permissions {
            entries.insert(p.clone(), allow);
        }
        drop(entries);

        tracing::debug!(%scope, ?permissions, allow, "access stored");
        Ok(AccessRecord {
            scope: scope.clone(),
            permissions,
            allow,
        })
    }

    async fn revoke_access(&self, scope: &Scope, permission: Option<&str>) -> Result<bool> {
        let Some(permission) = permission else {
            return Ok(self.scopes.remove(scope).is_some());
        };

        let removed = match self.scopes.get_mut(scope) {
            Some(mut entries) => entries.remove(&Permission::from(permission)).is_some(),
            None => false,
        };
        self.scopes.remove_if(scope, |_, entries| entries.is_empty());
        Ok(removed)
    }

    async fn scopes(&self) -> Result<Vec<Scope>> {
        let mut out: Vec<Scope> = self.scopes.iter().map(|e| e.key().clone()).collect();
        out.sort();
        Ok(out)
    }

    async fn all_access(&self, scope: &Scope) -> Result<Vec<AccessRecord>> {
        Ok(self
            .scopes
            .get(scope)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(p, allow)| AccessRecord {
                        scope: scope.clone(),
                        permissions: vec![p.clone()],
                        allow: *allow,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
