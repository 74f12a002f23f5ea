//! jobfinder-gateway server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use jobfinder_gateway::api;
use jobfinder_gateway::app_state::AppState;
use jobfinder_gateway::config::{GatewayConfig, LogFormat};
use jobfinder_gateway::domain::Repository;
use jobfinder_gateway::seed::seed_demo_data;
use jobfinder_gateway::service::MarketplaceService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting jobfinder-gateway");

    // Build domain and service layers
    let repository = Arc::new(Repository::new());
    let marketplace = MarketplaceService::new(repository, config.default_search_radius_km);

    if config.seed_demo_data {
        seed_demo_data(&marketplace).await?;
    }

    let app = api::build_app(AppState::new(marketplace), config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}
