//! Recording collaborators shared by the gate tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ipfsacl_core::error::Result;
use ipfsacl_core::model::{AccessRecord, PermissionTarget, PromptDecision, Scope};
use ipfsacl_gateway::acl::{AccessControl, MemoryAccessControl};
use ipfsacl_gateway::gate::{ProxyGate, ProxyState, StateSource};
use ipfsacl_gateway::obs::GateMetrics;
use ipfsacl_gateway::policy::CommandWhitelist;
use ipfsacl_gateway::prompt::AccessPrompt;

pub fn scope(url: &str) -> Scope {
    Scope::from_page_url(url).unwrap()
}

/// Memory store that counts reads and remembers writes.
#[derive(Default)]
pub struct RecordingAcl {
    pub inner: MemoryAccessControl,
    pub gets: AtomicUsize,
    pub sets: Mutex<Vec<(Scope, PermissionTarget, bool)>>,
}

impl RecordingAcl {
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<(Scope, PermissionTarget, bool)> {
        self.sets.lock().unwrap().clone()
    }

    /// Seed a decision without it showing up in `writes`.
    pub async fn seed(&self, scope: &Scope, commands: &[&str], allow: bool) {
        let target = PermissionTarget::Commands(commands.iter().map(|c| c.to_string()).collect());
        self.inner.set_access(scope, target, allow).await.unwrap();
    }
}

#[async_trait]
impl AccessControl for RecordingAcl {
    async fn get_access(&self, scope: &Scope, command: &str) -> Result<Option<AccessRecord>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_access(scope, command).await
    }

    async fn set_access(
        &self,
        scope: &Scope,
        target: PermissionTarget,
        allow: bool,
    ) -> Result<AccessRecord> {
        self.sets
            .lock()
            .unwrap()
            .push((scope.clone(), target.clone(), allow));
        self.inner.set_access(scope, target, allow).await
    }

    async fn revoke_access(&self, scope: &Scope, permission: Option<&str>) -> Result<bool> {
        self.inner.revoke_access(scope, permission).await
    }

    async fn scopes(&self) -> Result<Vec<Scope>> {
        self.inner.scopes().await
    }

    async fn all_access(&self, scope: &Scope) -> Result<Vec<AccessRecord>> {
        self.inner.all_access(scope).await
    }
}

/// Prompt that answers with a scripted decision and records what it was asked.
pub struct ScriptedPrompt {
    decision: PromptDecision,
    pub asked: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(allow: bool, wildcard: bool) -> Self {
        Self {
            decision: PromptDecision { allow, wildcard },
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessPrompt for ScriptedPrompt {
    async fn request_access(&self, _scope: &Scope, permissions: &[String]) -> Result<PromptDecision> {
        self.asked.lock().unwrap().push(permissions.to_vec());
        Ok(self.decision)
    }
}

pub struct Harness {
    pub gate: ProxyGate,
    pub acl: Arc<RecordingAcl>,
    pub prompt: Arc<ScriptedPrompt>,
    pub metrics: Arc<GateMetrics>,
}

pub const WHITELIST: &[&str] = &["id", "version", "files.*", "pin.add"];

pub fn harness_with(state: impl StateSource + 'static, prompt: ScriptedPrompt) -> Harness {
    let raw: Vec<String> = WHITELIST.iter().map(|s| s.to_string()).collect();
    let acl = Arc::new(RecordingAcl::default());
    let prompt = Arc::new(prompt);
    let metrics = Arc::new(GateMetrics::default());

    let gate = ProxyGate::new(
        Arc::new(state),
        CommandWhitelist::compile(&raw).unwrap(),
        acl.clone(),
        prompt.clone(),
        metrics.clone(),
    );
    Harness { gate, acl, prompt, metrics }
}

pub fn harness(prompt: ScriptedPrompt) -> Harness {
    harness_with(ProxyState::enabled(), prompt)
}
