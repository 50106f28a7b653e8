//! REST API module
//!
//! JSON endpoints for watchlists, stock detail, search, AI reports and
//! market movers, plus an SVG chart endpoint. Every response uses the
//! [`ApiResponse`] envelope; errors are rendered by
//! [`AppError`](crate::error::AppError).

mod server;
pub mod handlers;
mod types;

pub use server::{router, ApiServer};
pub use types::{
    AddWatchlistRequest,
    ApiResponse,
    ChartQuery,
    Empty,
    SearchQuery,
    WatchlistUpdate,
};
