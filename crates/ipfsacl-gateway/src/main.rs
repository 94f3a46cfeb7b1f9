//! ipfsacl gateway
//!
//! Local access mediator for proxied IPFS API calls:
//! - `POST /v1/enable`: up-front permission negotiation for a page
//! - `POST /v1/commands/:command/authorize`: per-command check
//! - prompt, access-list and settings routes for the host
//!
//! Usage: `ipfsacl-gateway [config.yaml]` (default `ipfsacl.yaml`).

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use ipfsacl_core::error::{AclError, Result};
use ipfsacl_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "ipfsacl.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let state = app_state::AppState::new(cfg)?;
    let listen: SocketAddr = state
        .cfg()
        .gateway
        .listen
        .parse()
        .map_err(|e| AclError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}")))?;

    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "ipfsacl-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| AclError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AclError::Internal(format!("server failed: {e}")))
}
