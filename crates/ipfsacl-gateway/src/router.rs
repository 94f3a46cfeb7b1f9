//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/enable", post(http::enable))
        .route("/v1/commands/:command/authorize", post(http::authorize_command))
        .route("/v1/prompts", get(http::list_prompts))
        .route("/v1/prompts/:id", post(http::answer_prompt))
        .route("/v1/acl", get(http::list_access).delete(http::revoke_access))
        .route("/v1/settings", get(http::get_settings).put(http::put_settings))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
