//! Web server for US state choropleth maps.
//!
//! Accepts CSV/Excel uploads, saves map configurations and serves embeddable
//! map pages.

mod config;
mod error;
mod routes;
mod state;
mod tiles;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, public_url = %config.public_url, "Starting map server");

    let store = map_store::open_store(&config.store).await?;

    let addr = config.addr;
    let app = routes::router(AppState::new(store, config));

    info!(addr = %addr, "Map server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
