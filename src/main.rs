use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use steamgraph::http::{AppState, HttpServer};
use steamgraph::{CatalogService, DashboardConfig, HttpGateway};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref())
        .context("loading dashboard configuration")?;

    info!("Steamgraph v{}", steamgraph::VERSION);
    info!("SPARQL endpoint: {}", config.gateway.endpoint);

    let gateway = HttpGateway::new(config.gateway.clone()).context("creating query gateway")?;
    let state = AppState::new(CatalogService::new(Arc::new(gateway)), config.limits);

    HttpServer::new(config.server, state)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("dashboard server stopped: {}", e))
}
