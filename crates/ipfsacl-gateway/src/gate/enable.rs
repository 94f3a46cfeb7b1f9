use std::collections::HashSet;

use ipfsacl_core::error::{AclError, Result};
use ipfsacl_core::model::{EnableOpts, PermissionTarget};

use super::ProxyGate;
use crate::context::ScopeResolver;

impl ProxyGate {
    /// Enable proxy access for the calling page.
    ///
    /// Without `opts.commands` this only checks that the proxy is active.
    /// With commands, every one must be whitelisted; recorded denials fail
    /// the call before any prompt; the remaining undecided commands are asked
    /// about in a single prompt and the answer is persisted before it is
    /// enforced.
    pub async fn enable(&self, resolver: &dyn ScopeResolver, opts: Option<&EnableOpts>) -> Result<()> {
        let res = self.run_enable(resolver, opts).await;
        self.record("enable", &res);
        res
    }

    async fn run_enable(&self, resolver: &dyn ScopeResolver, opts: Option<&EnableOpts>) -> Result<()> {
        let scope = resolver.resolve().await?;
        tracing::debug!(%scope, ?opts, "enable request");

        self.ensure_active(&scope)?;

        let Some(commands) = opts.and_then(|o| o.commands.as_deref()) else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        let mut denied = Vec::new();
        for command in commands {
            if !seen.insert(command.as_str()) {
                continue;
            }
            self.ensure_whitelisted(command)?;

            match self.acl.get_access(&scope, command).await? {
                None => missing.push(command.clone()),
                Some(access) if !access.allow => denied.push(command.clone()),
                Some(_) => {}
            }
        }

        if !denied.is_empty() {
            tracing::info!(%scope, ?denied, "enable refused: permissions denied earlier");
            return Err(AclError::access_denied(&scope, denied));
        }

        if missing.is_empty() {
            return Ok(());
        }

        let decision = self.prompt.request_access(&scope, &missing).await?;
        let target = if decision.wildcard {
            PermissionTarget::Wildcard
        } else {
            PermissionTarget::Commands(missing.clone())
        };
        let access = self.acl.set_access(&scope, target, decision.allow).await?;

        if !access.allow {
            tracing::info!(%scope, ?missing, "enable refused by user");
            return Err(AclError::access_denied(&scope, missing));
        }
        tracing::info!(%scope, granted = ?missing, wildcard = decision.wildcard, "proxy access granted");
        Ok(())
    }
}
