use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use miner_server::{router, AppState, InMemoryScoreStore, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = ServerConfig::from_env()?;
    let params = cfg.engine_params()?;
    info!(rows = cfg.rows, cols = cfg.cols, "engine ready");

    let state = Arc::new(AppState::new(params, Arc::new(InMemoryScoreStore::new())));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind).await?;
    info!("listening on {}", cfg.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
