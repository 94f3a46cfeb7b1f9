//! Proxy state consulted by the gate on every call.
//!
//! The gate never caches a snapshot: toggling the proxy or a site through
//! `/v1/settings` takes effect on the next call.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use ipfsacl_core::error::{AclError, Result};
use ipfsacl_core::model::Scope;

use crate::config::ProxySection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyState {
    /// Global switch for the API proxy.
    pub proxy_enabled: bool,
    /// Default for per-site integrations.
    pub integrations: bool,
    /// Sites (and their subdomains) with integrations switched off.
    pub disabled_hosts: Vec<String>,
}

impl ProxyState {
    pub fn from_config(cfg: &ProxySection) -> Self {
        Self {
            proxy_enabled: cfg.enabled,
            integrations: cfg.integrations,
            disabled_hosts: cfg.disabled_hosts.iter().map(|h| normalize_host(h)).collect(),
        }
    }

    /// Everything enabled, nothing excluded.
    pub fn enabled() -> Self {
        Self {
            proxy_enabled: true,
            integrations: true,
            disabled_hosts: Vec::new(),
        }
    }

    pub fn integration_active(&self, scope: &Scope) -> bool {
        if !self.integrations {
            return false;
        }
        let host = normalize_host(scope.host());
        let host = host.as_str();
        !self
            .disabled_hosts
            .iter()
            .any(|d| host == d.as_str() || host.strip_suffix(d.as_str()).is_some_and(|rest| rest.ends_with('.')))
    }
}

/// Lowercase, no trailing dot, IPv6 literals without brackets.
fn normalize_host(h: &str) -> String {
    let h = h.trim();
    let h = h
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(h);
    h.trim_end_matches('.').to_ascii_lowercase()
}

pub trait StateSource: Send + Sync {
    fn snapshot(&self) -> ProxyState;
}

impl StateSource for ProxyState {
    fn snapshot(&self) -> ProxyState {
        self.clone()
    }
}

/// Partial update accepted by `PUT /v1/settings`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(default)]
    pub proxy_enabled: Option<bool>,
    #[serde(default)]
    pub integrations: Option<bool>,
    #[serde(default)]
    pub disabled_hosts: Option<Vec<String>>,
}

/// Runtime-mutable proxy state shared by the gate and the settings routes.
#[derive(Debug)]
pub struct SharedSettings {
    inner: RwLock<ProxyState>,
}

impl SharedSettings {
    pub fn new(initial: ProxyState) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub fn apply(&self, patch: SettingsPatch) -> Result<ProxyState> {
        let hosts = match patch.disabled_hosts {
            Some(raw) => {
                if raw.iter().any(|h| h.trim().is_empty()) {
                    return Err(AclError::BadRequest(
                        "disabled_hosts entries must not be empty".into(),
                    ));
                }
                Some(raw.iter().map(|h| normalize_host(h)).collect())
            }
            None => None,
        };

        let mut g = self
            .inner
            .write()
            .map_err(|_| AclError::Internal("settings lock poisoned".into()))?;
        if let Some(v) = patch.proxy_enabled {
            g.proxy_enabled = v;
        }
        if let Some(v) = patch.integrations {
            g.integrations = v;
        }
        if let Some(v) = hosts {
            g.disabled_hosts = v;
        }

        tracing::info!(proxy_enabled = g.proxy_enabled, integrations = g.integrations, disabled_hosts = ?g.disabled_hosts, "proxy settings updated");
        Ok(g.clone())
    }
}

impl StateSource for SharedSettings {
    fn snapshot(&self) -> ProxyState {
        // Poisoned lock means a writer panicked; report the proxy as off.
        match self.inner.read() {
            Ok(g) => g.clone(),
            Err(_) => {
                tracing::error!("settings lock poisoned; treating proxy as disabled");
                ProxyState {
                    proxy_enabled: false,
                    ..ProxyState::enabled()
                }
            }
        }
    }
}
