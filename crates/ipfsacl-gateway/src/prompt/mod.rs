//! User-facing access prompts.
//!
//! The gate asks through [`AccessPrompt`] and persists whatever comes back.
//! - [`PromptHub`]: parks the request until the host answers it over HTTP.
//! - [`FixedPrompt`]: answers immediately (headless setups, tests).

pub mod fixed;
pub mod hub;

use async_trait::async_trait;

use ipfsacl_core::error::Result;
use ipfsacl_core::model::{PromptDecision, Scope};

pub use fixed::FixedPrompt;
pub use hub::{PendingPrompt, PromptHub};

#[async_trait]
pub trait AccessPrompt: Send + Sync {
    /// Ask the user once about every command in `permissions`.
    async fn request_access(&self, scope: &Scope, permissions: &[String]) -> Result<PromptDecision>;
}
