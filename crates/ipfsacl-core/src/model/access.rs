//! Permissions, access records and prompt decisions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Scope;

/// Wire form of the wildcard permission.
pub const WILDCARD: &str = "*";

/// One entry of a scope's access list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Permission {
    /// Every command (`*`).
    All,
    /// A single proxied command, e.g. `files.add`.
    Command(String),
}

impl Permission {
    pub fn as_str(&self) -> &str {
        match self {
            Permission::All => WILDCARD,
            Permission::Command(c) => c,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Permission::All)
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        if s == WILDCARD {
            Permission::All
        } else {
            Permission::Command(s.to_string())
        }
    }
}

impl From<String> for Permission {
    fn from(s: String) -> Self {
        if s == WILDCARD {
            Permission::All
        } else {
            Permission::Command(s)
        }
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        match p {
            Permission::All => WILDCARD.to_string(),
            Permission::Command(c) => c,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single `set_access` call writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionTarget {
    /// One `*` record for the scope.
    Wildcard,
    /// One record per command, all sharing the same `allow`.
    Commands(Vec<String>),
}

impl PermissionTarget {
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            PermissionTarget::Wildcard => vec![Permission::All],
            PermissionTarget::Commands(cmds) => {
                cmds.iter().map(|c| Permission::from(c.as_str())).collect()
            }
        }
    }
}

/// Access decision stored for a scope.
///
/// Returned by lookups (one permission: the entry that matched, which may be
/// `*`) and by writes (every permission written).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRecord {
    pub scope: Scope,
    pub permissions: Vec<Permission>,
    pub allow: bool,
}

/// Answer to an access prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptDecision {
    pub allow: bool,
    /// Apply the answer to every command of the scope.
    #[serde(default)]
    pub wildcard: bool,
}

/// Options passed to `enable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableOpts {
    /// Commands to negotiate up front. `None` skips negotiation.
    #[serde(default)]
    pub commands: Option<Vec<String>>,
}

impl EnableOpts {
    pub fn with_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: Some(commands.into_iter().map(Into::into).collect()),
        }
    }
}
