//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    let pending = state.prompt_hub().map(|h| h.pending_len() as u64).unwrap_or(0);
    let body = state.metrics().render(&[("ipfsacl_prompts_pending", pending)]);

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
