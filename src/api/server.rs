//! HTTP server for the REST API

use crate::api::handlers;
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    routing::{delete, get},
    Router,
};
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the API router
pub fn router(state: AppState) -> Router {
    let cors_permissive = state.config.cors_permissive;

    let app = Router::new()
        // ================================================================
        // Health check
        // ================================================================
        .route("/health", get(handlers::health_check))

        // ================================================================
        // Watchlist
        // ================================================================
        .route(
            "/api/users/:user_id/watchlist",
            get(handlers::get_watchlist).post(handlers::add_to_watchlist),
        )
        .route(
            "/api/users/:user_id/watchlist/:code",
            delete(handlers::remove_from_watchlist),
        )

        // ================================================================
        // Stock detail
        // ================================================================
        .route("/api/stocks/:code", get(handlers::get_stock_detail))
        .route("/api/stocks/:code/chart.svg", get(handlers::get_stock_chart))
        .route("/api/stocks/:code/report", get(handlers::get_stock_report))

        // ================================================================
        // Search and market data
        // ================================================================
        .route("/api/search", get(handlers::search_symbols))
        .route("/api/autocomplete", get(handlers::autocomplete_symbols))
        .route("/api/market/movers", get(handlers::get_market_movers))
        .route("/api/market/sentiment", get(handlers::get_market_sentiment))
        .route("/api/market/sentiment-trend", get(handlers::get_market_sentiment_trend))
        .route("/api/market/sentiment-leaders", get(handlers::get_sentiment_leaders))

        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

/// API server manager
pub struct ApiServer {
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Create a new server
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            shutdown_tx: None,
            task: None,
        }
    }

    /// Bind and start serving in the background; returns the bound address
    pub async fn start(&mut self) -> Result<SocketAddr> {
        if self.is_running() {
            return Err(AppError::Internal("API server already running".to_string()));
        }

        let addr = self.state.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let app = router(self.state.clone());

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        info!("Starting StockLens API server on {}", local_addr);

        self.task = Some(tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        }));

        info!("=== Endpoints ===");
        info!("  GET    http://{}/health", local_addr);
        info!("  GET    http://{}/api/users/{{user_id}}/watchlist", local_addr);
        info!("  POST   http://{}/api/users/{{user_id}}/watchlist", local_addr);
        info!("  DELETE http://{}/api/users/{{user_id}}/watchlist/{{code}}", local_addr);
        info!("  GET    http://{}/api/stocks/{{code}}", local_addr);
        info!("  GET    http://{}/api/stocks/{{code}}/chart.svg?n=", local_addr);
        info!("  GET    http://{}/api/stocks/{{code}}/report", local_addr);
        info!("  GET    http://{}/api/search?query=", local_addr);
        info!("  GET    http://{}/api/autocomplete?query=", local_addr);
        info!("  GET    http://{}/api/market/movers", local_addr);
        info!("  GET    http://{}/api/market/sentiment", local_addr);
        info!("  GET    http://{}/api/market/sentiment-trend", local_addr);
        info!("  GET    http://{}/api/market/sentiment-leaders", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop signal sent");
        }
    }

    /// Stop the server and wait for in-flight requests to finish
    pub async fn shutdown(&mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("API server task failed: {}", e);
            }
        }
    }

    /// Check if server is running
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}
