//! Command whitelist compilation and matching.
//!
//! Entries are either an exact command (`files.add`) or a namespace wildcard
//! (`files.*`). A bare `*` is rejected: the whitelist is the only thing that
//! bounds what a page can ever be prompted about.

use ipfsacl_core::error::{AclError, Result};

/// Compiled whitelist rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRule {
    Exact(String),
    /// Stored with the trailing dot (`files.`).
    Namespace(String),
}

impl CommandRule {
    fn matches(&self, command: &str) -> bool {
        match self {
            CommandRule::Exact(c) => c == command,
            CommandRule::Namespace(prefix) => {
                command.len() > prefix.len() && command.starts_with(prefix.as_str())
            }
        }
    }
}

pub fn compile_rules(raw: &[String]) -> Result<Vec<CommandRule>> {
    let mut out = Vec::with_capacity(raw.len());
    for s in raw {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(AclError::BadRequest(format!(
                "invalid whitelist entry: {s:?} (expected command or namespace.*)"
            )));
        }
        if s == "*" {
            return Err(AclError::BadRequest(
                "whitelist entry `*` is not allowed (list commands or namespace.*)".into(),
            ));
        }

        let rule = match s.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('.') && prefix.len() > 1 && !prefix.contains('*') => {
                CommandRule::Namespace(prefix.to_string())
            }
            Some(_) => {
                return Err(AclError::BadRequest(format!(
                    "invalid whitelist wildcard: {s} (only namespace.* is supported)"
                )))
            }
            None if s.contains('*') => {
                return Err(AclError::BadRequest(format!(
                    "invalid whitelist wildcard: {s} (only namespace.* is supported)"
                )))
            }
            None => CommandRule::Exact(s.clone()),
        };
        out.push(rule);
    }
    Ok(out)
}

/// Compiled proxy command whitelist.
#[derive(Debug, Clone, Default)]
pub struct CommandWhitelist {
    rules: Vec<CommandRule>,
}

impl CommandWhitelist {
    pub fn compile(raw: &[String]) -> Result<Self> {
        Ok(Self {
            rules: compile_rules(raw)?,
        })
    }

    /// Empty whitelist allows nothing.
    pub fn allows(&self, command: &str) -> bool {
        self.rules.iter().any(|r| r.matches(command))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
