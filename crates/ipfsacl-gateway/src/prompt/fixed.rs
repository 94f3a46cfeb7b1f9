use async_trait::async_trait;

use ipfsacl_core::error::Result;
use ipfsacl_core::model::{PromptDecision, Scope};

use super::AccessPrompt;

/// Prompt that always returns the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompt {
    decision: PromptDecision,
}

impl FixedPrompt {
    pub fn new(decision: PromptDecision) -> Self {
        Self { decision }
    }

    pub fn allow() -> Self {
        Self::new(PromptDecision { allow: true, wildcard: false })
    }

    pub fn deny() -> Self {
        Self::new(PromptDecision { allow: false, wildcard: false })
    }
}

#[async_trait]
impl AccessPrompt for FixedPrompt {
    async fn request_access(&self, scope: &Scope, permissions: &[String]) -> Result<PromptDecision> {
        tracing::info!(%scope, ?permissions, allow = self.decision.allow, "access prompt auto-answered");
        Ok(self.decision)
    }
}
