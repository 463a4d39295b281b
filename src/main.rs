//! search-badge server
//!
//! Binds the badge routes and serves until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use search_badge::api::{build_router, AppState};
use search_badge::config::Config;
use search_badge::search::SourcegraphClient;

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .json()
        .init();

    let config = Config::from_env();
    info!(api_url = %config.api_url, "starting search-badge");

    let backend = Arc::new(SourcegraphClient::new(config.api_url.clone())?);
    let state = AppState { backend };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
