use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use ipfsacl_core::error::{AclError, Result};
use ipfsacl_core::model::Scope;

/// Header carrying the full URL of the page the host acts for.
pub const PAGE_URL_HEADER: &str = "x-page-url";

/// Resolves the scope of the calling page.
#[async_trait]
pub trait ScopeResolver: Send + Sync {
    async fn resolve(&self) -> Result<Scope>;
}

#[async_trait]
impl ScopeResolver for Scope {
    async fn resolve(&self) -> Result<Scope> {
        Ok(self.clone())
    }
}

/// Scope from request headers: `x-page-url`, falling back to `Origin`.
pub struct HeaderScope<'a> {
    headers: &'a HeaderMap,
}

impl<'a> HeaderScope<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

#[async_trait]
impl ScopeResolver for HeaderScope<'_> {
    async fn resolve(&self) -> Result<Scope> {
        let raw = self
            .headers
            .get(PAGE_URL_HEADER)
            .or_else(|| self.headers.get(header::ORIGIN))
            .ok_or_else(|| {
                AclError::BadRequest(format!("missing {PAGE_URL_HEADER} or origin header"))
            })?
            .to_str()
            .map_err(|_| AclError::BadRequest("page url header is not ascii".into()))?;

        Scope::from_page_url(raw)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn page_url_header_wins_over_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://other.example"));
        headers.insert(PAGE_URL_HEADER, HeaderValue::from_static("https://ipfs.io/docs/a.html"));

        let scope = HeaderScope::new(&headers).resolve().await.unwrap();
        assert_eq!(scope.as_str(), "https://ipfs.io/docs/");
    }

    #[tokio::test]
    async fn falls_back_to_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://ipfs.io"));

        let scope = HeaderScope::new(&headers).resolve().await.unwrap();
        assert_eq!(scope.as_str(), "https://ipfs.io/");
    }

    #[tokio::test]
    async fn missing_headers_is_bad_request() {
        let headers = HeaderMap::new();
        let err = HeaderScope::new(&headers).resolve().await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    }
}
