//! HTTP handlers.
//!
//! Page-facing routes (`/v1/enable`, `/v1/commands/...`) take the page scope
//! from headers. Host-facing routes answer prompts and manage the access list
//! and proxy settings.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use ipfsacl_core::error::AclError;
use ipfsacl_core::model::{EnableOpts, PromptDecision, Scope};

use crate::app_state::AppState;
use crate::context::HeaderScope;
use crate::gate::{ProxyState, SettingsPatch, StateSource};
use crate::prompt::PendingPrompt;
use crate::transport::error::ApiError;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Empty body or `null` means "enable without options".
fn parse_enable_opts(body: &[u8]) -> Result<Option<EnableOpts>, AclError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map_err(|e| AclError::BadRequest(format!("invalid enable options: {e}")))
}

pub async fn enable(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let opts = parse_enable_opts(&body)?;
    app.gate()
        .enable(&HeaderScope::new(&headers), opts.as_ref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn authorize_command(
    State(app): State<AppState>,
    Path(command): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    app.gate()
        .authorize_command(&HeaderScope::new(&headers), &command)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_prompts(State(app): State<AppState>) -> ApiResult<Json<Vec<PendingPrompt>>> {
    let hub = app
        .prompt_hub()
        .ok_or_else(|| AclError::NotFound("prompts are answered automatically".into()))?;
    Ok(Json(hub.pending()))
}

pub async fn answer_prompt(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(decision): Json<PromptDecision>,
) -> ApiResult<StatusCode> {
    let hub = app
        .prompt_hub()
        .ok_or_else(|| AclError::NotFound("prompts are answered automatically".into()))?;
    hub.respond(id, decision)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AclQuery {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
}

pub async fn list_access(
    State(app): State<AppState>,
    Query(q): Query<AclQuery>,
) -> ApiResult<Json<Value>> {
    let acl = app.acl();
    match q.scope {
        Some(raw) => {
            let scope = Scope::from_page_url(&raw)?;
            let records = acl.all_access(&scope).await?;
            Ok(Json(json!({ "scope": scope, "access": records })))
        }
        None => Ok(Json(json!({ "scopes": acl.scopes().await? }))),
    }
}

pub async fn revoke_access(
    State(app): State<AppState>,
    Query(q): Query<AclQuery>,
) -> ApiResult<StatusCode> {
    let raw = q
        .scope
        .ok_or_else(|| AclError::BadRequest("scope query parameter is required".into()))?;
    let scope = Scope::from_page_url(&raw)?;

    let removed = app.acl().revoke_access(&scope, q.permission.as_deref()).await?;
    if !removed {
        return Err(AclError::NotFound(format!("no access recorded for {scope}")).into());
    }
    tracing::info!(%scope, permission = ?q.permission, "access revoked");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_settings(State(app): State<AppState>) -> Json<ProxyState> {
    Json(app.settings().snapshot())
}

pub async fn put_settings(
    State(app): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<ProxyState>> {
    Ok(Json(app.settings().apply(patch)?))
}
