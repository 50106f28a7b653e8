//! Services Layer
//!
//! Business logic shared by the REST API handlers and the integration tests.
//! Services take a [`StockDb`](crate::db::StockDb) and never hold state
//! between calls; every watchlist or detail view is recomputed from storage.
//!
//! # Architecture
//!
//! ```text
//! REST API --> Services --> StockDb (r2d2 pool) --> SQLite
//!                 │
//!                 └──> MiniChartRenderer (SVG)
//! ```
//!
//! # Services
//!
//! - `PriceService` - Recent price series per instrument
//! - `WatchlistService` - Watchlist display rows, add/remove
//! - `DetailService` - Single-instrument detail payload
//! - `SymbolService` - Symbol search and autocomplete
//! - `ReportService` - Latest AI report
//! - `MarketService` - Rising/falling movers, market sentiment index

pub mod display;
pub mod instrument;
pub mod chart_service;
pub mod price_service;
pub mod watchlist_service;
pub mod detail_service;
pub mod symbol_service;
pub mod report_service;
pub mod market_service;

// Re-export commonly used types and services
pub use chart_service::{ChartOptions, MiniChartRenderer};
pub use detail_service::{DetailPayload, DetailService, SentimentStatus};
pub use display::Direction;
pub use market_service::{
    MarketMovers, MarketSentimentSummary, MarketService, Mover, SentimentLeader, SentimentLeaders,
    SentimentRatios, TrendPoint,
};
pub use price_service::PriceService;
pub use report_service::ReportService;
pub use symbol_service::SymbolService;
pub use watchlist_service::{AddOutcome, DisplayRow, WatchlistService};
