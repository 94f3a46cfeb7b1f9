//! Pending-prompt hub.
//!
//! `request_access` parks a oneshot sender under a fresh id and waits; the
//! host lists pending prompts, shows its dialog, and calls `respond`. If the
//! waiting caller goes away (client disconnect, dropped future) the prompt is
//! withdrawn so a late answer cannot be persisted for a call nobody awaits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::oneshot;

use ipfsacl_core::error::{AclError, Result};
use ipfsacl_core::model::{PromptDecision, Scope};

use super::AccessPrompt;
use crate::obs::metrics::GateMetrics;

/// Prompt waiting for an answer, as shown to the host.
#[derive(Debug, Clone, Serialize)]
pub struct PendingPrompt {
    pub id: u64,
    pub scope: Scope,
    pub permissions: Vec<String>,
}

struct Waiter {
    prompt: PendingPrompt,
    tx: oneshot::Sender<PromptDecision>,
}

pub struct PromptHub {
    pending: DashMap<u64, Waiter>,
    seq: AtomicU64,
    timeout: Option<Duration>,
    metrics: Arc<GateMetrics>,
}

/// Removes the waiter when the request future ends, however it ends.
struct PendingGuard<'a> {
    hub: &'a PromptHub,
    id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.hub.pending.remove(&self.id).is_some() {
            tracing::debug!(prompt_id = self.id, "access prompt withdrawn");
        }
    }
}

impl PromptHub {
    /// `timeout_ms == 0` waits indefinitely.
    pub fn new(timeout_ms: u64, metrics: Arc<GateMetrics>) -> Self {
        Self {
            pending: DashMap::new(),
            seq: AtomicU64::new(1),
            timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            metrics,
        }
    }

    /// Pending prompts, oldest first.
    pub fn pending(&self) -> Vec<PendingPrompt> {
        let mut out: Vec<PendingPrompt> =
            self.pending.iter().map(|e| e.value().prompt.clone()).collect();
        out.sort_by_key(|p| p.id);
        out
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Deliver the user's answer. Unknown or already-answered ids are `NotFound`.
    pub fn respond(&self, id: u64, decision: PromptDecision) -> Result<()> {
        let (_, waiter) = self
            .pending
            .remove(&id)
            .ok_or_else(|| AclError::NotFound(format!("no pending prompt with id {id}")))?;

        waiter
            .tx
            .send(decision)
            .map_err(|_| AclError::NotFound(format!("prompt {id} is no longer awaited")))
    }
}

#[async_trait]
impl AccessPrompt for PromptHub {
    async fn request_access(&self, scope: &Scope, permissions: &[String]) -> Result<PromptDecision> {
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        let prompt = PendingPrompt {
            id,
            scope: scope.clone(),
            permissions: permissions.to_vec(),
        };

        self.pending.insert(id, Waiter { prompt, tx });
        let _guard = PendingGuard { hub: self, id };
        tracing::info!(prompt_id = id, %scope, ?permissions, "access prompt pending");

        let answer = match self.timeout {
            Some(t) => tokio::time::timeout(t, rx).await.map_err(|_| {
                tracing::warn!(prompt_id = id, %scope, "access prompt timed out");
                self.metrics.prompts.inc(&[("outcome", "timeout")]);
                AclError::PromptTimeout
            })?,
            None => rx.await,
        };

        let decision = answer
            .map_err(|_| AclError::Internal(format!("prompt {id} dropped without an answer")))?;

        let outcome = match (decision.allow, decision.wildcard) {
            (true, true) => "allow_all",
            (true, false) => "allow",
            (false, true) => "deny_all",
            (false, false) => "deny",
        };
        self.metrics.prompts.inc(&[("outcome", outcome)]);
        tracing::info!(prompt_id = id, %scope, allow = decision.allow, wildcard = decision.wildcard, "access prompt answered");

        Ok(decision)
    }
}
