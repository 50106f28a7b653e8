//! StockLens - Watchlist and Stock Information Service
//!
//! Per-user watchlists with inline SVG mini charts, stock detail with news
//! and sentiment, symbol search, AI reports and market movers, served as a
//! JSON API over a pooled SQLite database.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;

use api::ApiServer;
use config::AppConfig;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging, open the database and serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocklens_lib=debug,stocklens=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StockLens...");

    let config = AppConfig::from_env()?;
    let app_state = AppState::new(config)?;
    tracing::info!("Application state initialized");

    let mut server = ApiServer::new(app_state);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    server.shutdown().await;

    Ok(())
}
