//! Pacing HTTP Server Binary
//!
//! Main entry point for the pacing REST API server. It loads configuration,
//! initializes the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin pacing-server
//!
//! # Bind elsewhere and disable the pacing cache
//! PORT=9090 PACING_CACHE_TTL_SECS=0 cargo run --bin pacing-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Storage backend (default: local)
//! - `PACING_CACHE_TTL_SECS`: Pacing cache lifetime (default: 60)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use adops_pacing::config::AppConfig;
use adops_pacing::db;
use adops_pacing::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting pacing HTTP server");

    let config = AppConfig::load().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize global repository once and reuse it across the app
    db::init_repository_with(&config)?;
    let repository = Arc::clone(db::get_repository()?);
    info!(
        "Repository initialized ({}), pacing cache TTL {}s",
        config.repository.repo_type, config.pacing.cache_ttl_secs
    );

    let state = AppState::from_config(repository, &config);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
