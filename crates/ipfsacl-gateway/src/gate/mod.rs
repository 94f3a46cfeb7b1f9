//! Proxy access gate.
//!
//! [`ProxyGate::enable`] negotiates a batch of commands up front;
//! [`ProxyGate::authorize_command`] checks a single command right before it
//! is proxied. Both read the proxy state fresh, reject non-whitelisted
//! commands before touching the store, and never re-prompt for a recorded
//! denial.
//!
//! Concurrent calls are not serialized: two calls for the same scope may both
//! see a missing record and both prompt; the later write wins.

mod command;
mod enable;
pub mod state;

use std::sync::Arc;

use ipfsacl_core::error::{AclError, Result};
use ipfsacl_core::model::Scope;

use crate::acl::AccessControl;
use crate::obs::metrics::GateMetrics;
use crate::policy::CommandWhitelist;
use crate::prompt::AccessPrompt;

pub use state::{ProxyState, SettingsPatch, SharedSettings, StateSource};

pub struct ProxyGate {
    state: Arc<dyn StateSource>,
    whitelist: CommandWhitelist,
    acl: Arc<dyn AccessControl>,
    prompt: Arc<dyn AccessPrompt>,
    metrics: Arc<GateMetrics>,
}

impl ProxyGate {
    pub fn new(
        state: Arc<dyn StateSource>,
        whitelist: CommandWhitelist,
        acl: Arc<dyn AccessControl>,
        prompt: Arc<dyn AccessPrompt>,
        metrics: Arc<GateMetrics>,
    ) -> Self {
        Self {
            state,
            whitelist,
            acl,
            prompt,
            metrics,
        }
    }

    pub fn whitelist(&self) -> &CommandWhitelist {
        &self.whitelist
    }

    /// Proxy switched off globally, or for this site.
    fn ensure_active(&self, scope: &Scope) -> Result<()> {
        let state = self.state.snapshot();
        if !state.proxy_enabled || !state.integration_active(scope) {
            tracing::debug!(%scope, proxy_enabled = state.proxy_enabled, "proxy access disabled");
            return Err(AclError::AccessDisabled);
        }
        Ok(())
    }

    fn ensure_whitelisted(&self, command: &str) -> Result<()> {
        if !self.whitelist.allows(command) {
            tracing::warn!(%command, "command not whitelisted for proxy access");
            return Err(AclError::CommandNotWhitelisted(command.to_string()));
        }
        Ok(())
    }

    fn record(&self, op: &str, res: &Result<()>) {
        let outcome = match res {
            Ok(()) => "ok",
            Err(AclError::AccessDisabled) => "disabled",
            Err(AclError::CommandNotWhitelisted(_)) => "not_whitelisted",
            Err(AclError::AccessDenied { .. }) => "denied",
            Err(_) => "error",
        };
        self.metrics.decisions.inc(&[("op", op), ("outcome", outcome)]);
    }
}
