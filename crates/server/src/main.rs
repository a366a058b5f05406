//! folio-mcp server entry point.
//!
//! Boots the cache router (install, then activate) and serves MCP on stdio.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use folio_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!(origin = %config.origin, db = %config.db_path.display(), "starting folio-mcp on stdio transport");

    let state = match state::AppState::bootstrap(config).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "startup failed");
            return Err(e);
        }
    };

    let handler = handler::FolioServer::new(Arc::clone(&state));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    let settled = state.router.settle().await;
    tracing::debug!(settled, "background cache work settled");

    Ok(())
}
