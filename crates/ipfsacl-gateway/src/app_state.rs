//! Shared application state for the ipfsacl gateway.
//!
//! Compiles the whitelist, builds the store, prompt and gate once at startup
//! and hands out cheap clones to the handlers.

use std::sync::Arc;

use ipfsacl_core::error::{AclError, Result};

use crate::acl::{AccessControl, MemoryAccessControl};
use crate::config::{GatewayConfig, PromptMode};
use crate::gate::{ProxyGate, ProxyState, SharedSettings};
use crate::obs::GateMetrics;
use crate::policy::CommandWhitelist;
use crate::prompt::{AccessPrompt, FixedPrompt, PromptHub};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    gate: ProxyGate,
    acl: Arc<dyn AccessControl>,
    settings: Arc<SharedSettings>,
    prompt_hub: Option<Arc<PromptHub>>,
    metrics: Arc<GateMetrics>,
}

impl AppState {
    /// Build application state with the in-memory access list.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(MemoryAccessControl::new()))
    }

    /// Build application state around an existing access-control store.
    pub fn with_store(cfg: GatewayConfig, acl: Arc<dyn AccessControl>) -> Result<Self> {
        let whitelist = CommandWhitelist::compile(&cfg.whitelist)
            .map_err(|e| AclError::BadRequest(format!("whitelist compile failed: {e}")))?;
        if whitelist.is_empty() {
            tracing::warn!("command whitelist is empty; every command will be refused");
        }

        let metrics = Arc::new(GateMetrics::default());
        let settings = Arc::new(SharedSettings::new(ProxyState::from_config(&cfg.proxy)));

        let prompt_hub = (cfg.prompt.mode == PromptMode::Ask)
            .then(|| Arc::new(PromptHub::new(cfg.prompt.timeout_ms, Arc::clone(&metrics))));
        let prompt: Arc<dyn AccessPrompt> = match (&prompt_hub, cfg.prompt.mode) {
            (Some(hub), _) => hub.clone(),
            (None, PromptMode::Deny) => Arc::new(FixedPrompt::deny()),
            (None, _) => Arc::new(FixedPrompt::allow()),
        };

        let gate = ProxyGate::new(
            settings.clone(),
            whitelist,
            Arc::clone(&acl),
            prompt,
            Arc::clone(&metrics),
        );

        tracing::info!(
            whitelist_rules = gate.whitelist().len(),
            prompt_mode = ?cfg.prompt.mode,
            proxy_enabled = cfg.proxy.enabled,
            "gateway state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                gate,
                acl,
                settings,
                prompt_hub,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn gate(&self) -> &ProxyGate {
        &self.inner.gate
    }

    pub fn acl(&self) -> Arc<dyn AccessControl> {
        Arc::clone(&self.inner.acl)
    }

    pub fn settings(&self) -> Arc<SharedSettings> {
        Arc::clone(&self.inner.settings)
    }

    /// `None` when prompts are answered by a fixed policy.
    pub fn prompt_hub(&self) -> Option<Arc<PromptHub>> {
        self.inner.prompt_hub.clone()
    }

    pub fn metrics(&self) -> Arc<GateMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
