use serde::Deserialize;
use ipfsacl_core::error::{AclError, Result};

use crate::policy::whitelist::compile_rules;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub proxy: ProxySection,

    #[serde(default)]
    pub whitelist: Vec<String>,

    #[serde(default)]
    pub prompt: PromptSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AclError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.proxy.validate()?;
        self.prompt.validate()?;
        compile_rules(&self.whitelist)?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen
            .parse::<std::net::SocketAddr>()
            .map_err(|e| AclError::BadRequest(format!("gateway.listen must be a SocketAddr: {e}")))?;
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:5003".into()
}

/// Initial proxy state. Can be changed at runtime through `/v1/settings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Integrations are active for every site unless listed in `disabled_hosts`.
    #[serde(default = "default_true")]
    pub integrations: bool,

    #[serde(default)]
    pub disabled_hosts: Vec<String>,
}

impl Default for ProxySection {
    fn default() -> Self {
        Self {
            enabled: true,
            integrations: true,
            disabled_hosts: Vec::new(),
        }
    }
}

impl ProxySection {
    pub fn validate(&self) -> Result<()> {
        if self.disabled_hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(AclError::BadRequest(
                "proxy.disabled_hosts entries must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// Queue prompts for the host to answer.
    #[default]
    Ask,
    /// Grant everything that is asked (headless setups).
    Allow,
    /// Deny everything that is asked.
    Deny,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PromptSection {
    #[serde(default)]
    pub mode: PromptMode,

    /// 0 waits for an answer indefinitely.
    #[serde(default)]
    pub timeout_ms: u64,
}

impl PromptSection {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms != 0 && !(1000..=600000).contains(&self.timeout_ms) {
            return Err(AclError::BadRequest(
                "prompt.timeout_ms must be 0 or between 1000 and 600000".into(),
            ));
        }
        if self.mode != PromptMode::Ask && self.timeout_ms != 0 {
            return Err(AclError::BadRequest(
                "prompt.timeout_ms only applies to mode: ask".into(),
            ));
        }
        Ok(())
    }
}
