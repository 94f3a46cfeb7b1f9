use ipfsacl_core::error::{AclError, Result};
use ipfsacl_core::model::PermissionTarget;

use super::ProxyGate;
use crate::context::ScopeResolver;

impl ProxyGate {
    /// Check a single command right before it is proxied, prompting if the
    /// page has no decision for it yet.
    pub async fn authorize_command(&self, resolver: &dyn ScopeResolver, command: &str) -> Result<()> {
        let res = self.run_authorize(resolver, command).await;
        self.record("command", &res);
        res
    }

    async fn run_authorize(&self, resolver: &dyn ScopeResolver, command: &str) -> Result<()> {
        let scope = resolver.resolve().await?;
        self.ensure_active(&scope)?;
        self.ensure_whitelisted(command)?;

        let access = match self.acl.get_access(&scope, command).await? {
            Some(access) => access,
            None => {
                let single = [command.to_string()];
                let decision = self.prompt.request_access(&scope, &single).await?;
                let target = if decision.wildcard {
                    PermissionTarget::Wildcard
                } else {
                    PermissionTarget::Commands(single.to_vec())
                };
                self.acl.set_access(&scope, target, decision.allow).await?
            }
        };

        if !access.allow {
            tracing::debug!(%scope, %command, "command refused");
            return Err(AclError::access_denied(&scope, [command]));
        }
        Ok(())
    }
}
