//! Page scope: `<origin><directory>` with a trailing slash.
//!
//! `https://ipfs.io/ipns/docs/index.html` belongs to scope
//! `https://ipfs.io/ipns/docs/`. A stored scope applies to every page whose
//! scope it prefixes, so a grant for `https://ipfs.io/` covers the whole site.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AclError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope {
    value: String,
    host: String,
}

impl Scope {
    /// Derive the scope of a page from its URL.
    pub fn from_page_url(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| AclError::BadRequest(format!("invalid page url {raw}: {e}")))?;

        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(AclError::BadRequest(format!(
                "page url has no origin: {raw}"
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| AclError::BadRequest(format!("page url has no host: {raw}")))?
            .to_string();

        let path = url.path();
        let dir = match path.rfind('/') {
            Some(i) => &path[..=i],
            None => "/",
        };

        Ok(Self {
            value: format!("{}{}", origin.ascii_serialization(), dir),
            host,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Host part, used for per-site integration switches.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// True when `other` is this scope or lives below it.
    pub fn contains(&self, other: &Scope) -> bool {
        other.value.starts_with(&self.value)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for Scope {
    type Error = AclError;

    fn try_from(s: String) -> Result<Self> {
        Scope::from_page_url(&s)
    }
}

impl From<Scope> for String {
    fn from(s: Scope) -> Self {
        s.value
    }
}
