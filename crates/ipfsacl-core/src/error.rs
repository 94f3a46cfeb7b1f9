//! Shared error type across ipfsacl crates.

use thiserror::Error;

use crate::model::Scope;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Proxy access is switched off globally or for the calling site.
    AccessDisabled,
    /// Command is not in the proxy whitelist.
    CommandNotWhitelisted,
    /// User denied (now or earlier) one or more permissions.
    AccessDenied,
    /// Referenced prompt/record does not exist.
    NotFound,
    /// Nobody answered the access prompt in time.
    PromptTimeout,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AccessDisabled => "ACCESS_DISABLED",
            ClientCode::CommandNotWhitelisted => "COMMAND_NOT_WHITELISTED",
            ClientCode::AccessDenied => "ACCESS_DENIED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::PromptTimeout => "PROMPT_TIMEOUT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AclError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum AclError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("user disabled access to the API proxy")]
    AccessDisabled,
    #[error("command is not allowed to be proxied: {0}")]
    CommandNotWhitelisted(String),
    #[error("access denied for {scope}: {}", .permissions.join(", "))]
    AccessDenied {
        scope: Scope,
        permissions: Vec<String>,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access prompt timed out")]
    PromptTimeout,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl AclError {
    /// Denial for `scope` covering `permissions`.
    pub fn access_denied<I, S>(scope: &Scope, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AclError::AccessDenied {
            scope: scope.clone(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AclError::BadRequest(_) => ClientCode::BadRequest,
            AclError::AccessDisabled => ClientCode::AccessDisabled,
            AclError::CommandNotWhitelisted(_) => ClientCode::CommandNotWhitelisted,
            AclError::AccessDenied { .. } => ClientCode::AccessDenied,
            AclError::NotFound(_) => ClientCode::NotFound,
            AclError::PromptTimeout => ClientCode::PromptTimeout,
            AclError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            AclError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Permissions a client should display for ACL-related failures.
    pub fn permissions(&self) -> Option<&[String]> {
        match self {
            AclError::AccessDenied { permissions, .. } => Some(permissions.as_slice()),
            AclError::CommandNotWhitelisted(cmd) => Some(std::slice::from_ref(cmd)),
            _ => None,
        }
    }
}
