//! Error -> HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use ipfsacl_core::error::{AclError, ClientCode};

/// Wrapper so handlers can return `AclError` with `?`.
#[derive(Debug)]
pub struct ApiError(pub AclError);

impl From<AclError> for ApiError {
    fn from(e: AclError) -> Self {
        Self(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::AccessDisabled
        | ClientCode::CommandNotWhitelisted
        | ClientCode::AccessDenied => StatusCode::FORBIDDEN,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::PromptTimeout => StatusCode::GATEWAY_TIMEOUT,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let mut body = json!({
            "code": code.as_str(),
            "msg": self.0.to_string(),
        });
        if let AclError::AccessDenied { scope, .. } = &self.0 {
            body["scope"] = json!(scope);
        }
        if let Some(permissions) = self.0.permissions() {
            body["permissions"] = json!(permissions);
        }

        (status_for(code), Json(json!({ "error": body }))).into_response()
    }
}
