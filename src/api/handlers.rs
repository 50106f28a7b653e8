//! REST API endpoint handlers
//!
//! Storage work is synchronous, so each handler hands it to tokio's
//! blocking pool through [`blocking`].

use crate::api::types::*;
use crate::db::sqlite::models::{AiReport, StockSymbol};
use crate::db::StockDb;
use crate::error::{AppError, Result};
use crate::services::watchlist_service::WATCHLIST_CHART_POINTS;
use crate::services::{
    AddOutcome, DetailPayload, DetailService, DisplayRow, MarketMovers, MarketSentimentSummary,
    MarketService, MiniChartRenderer, PriceService, ReportService, SentimentLeaders,
    SymbolService, TrendPoint, WatchlistService,
};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::info;

/// Largest `n` accepted by the chart endpoint
pub const MAX_CHART_POINTS: usize = 365;

/// Extractor output; a rejection becomes `AppError::InvalidInput`
type Extracted<T, R> = std::result::Result<T, R>;

/// Run a storage operation on the blocking pool
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&StockDb) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|e| AppError::Internal(format!("Storage task failed: {}", e)))?
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint - GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::<Empty>::success_with_message("StockLens API is running"))
}

// ============================================================================
// Watchlist
// ============================================================================

/// GET /api/users/:user_id/watchlist
pub async fn get_watchlist(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<DisplayRow>>>> {
    let Path(user_id) = path?;
    let rows = blocking(&state, move |db| WatchlistService::build_display(db, user_id)).await?;
    Ok(Json(ApiResponse::success_with_data(rows)))
}

/// POST /api/users/:user_id/watchlist
///
/// Responds 201 when the instrument was added and 409 when it was already
/// on the watchlist; both carry the refreshed rows.
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
    body: Extracted<Json<AddWatchlistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<WatchlistUpdate>>)> {
    let Path(user_id) = path?;
    let Json(request) = body?;
    info!("Watchlist add request: user {} {}", user_id, request.stock_code);

    let (outcome, rows) = blocking(&state, move |db| {
        let outcome = WatchlistService::add(db, user_id, &request.stock_code)?;
        let rows = WatchlistService::build_display(db, user_id)?;
        Ok((outcome, rows))
    })
    .await?;

    let update = WatchlistUpdate {
        outcome: Some(outcome),
        removed: None,
        rows,
    };

    Ok(match outcome {
        AddOutcome::Added => (
            StatusCode::CREATED,
            Json(ApiResponse::success_with_data(update).with_message("Added to watchlist")),
        ),
        AddOutcome::AlreadyPresent => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Already on watchlist").with_data(update)),
        ),
    })
}

/// DELETE /api/users/:user_id/watchlist/:code
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    path: Extracted<Path<(i64, String)>, PathRejection>,
) -> Result<Json<ApiResponse<WatchlistUpdate>>> {
    let Path((user_id, code)) = path?;
    info!("Watchlist remove request: user {} {}", user_id, code);

    let (removed, rows) = blocking(&state, move |db| {
        let removed = WatchlistService::remove(db, user_id, &code)?;
        let rows = WatchlistService::build_display(db, user_id)?;
        Ok((removed, rows))
    })
    .await?;

    let message = if removed {
        "Removed from watchlist"
    } else {
        "Not on watchlist"
    };

    Ok(Json(
        ApiResponse::success_with_data(WatchlistUpdate {
            outcome: None,
            removed: Some(removed),
            rows,
        })
        .with_message(message),
    ))
}

// ============================================================================
// Stock detail
// ============================================================================

/// GET /api/stocks/:code
pub async fn get_stock_detail(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<DetailPayload>>> {
    let detail = blocking(&state, move |db| DetailService::assemble_detail(db, &code)).await?;
    Ok(Json(ApiResponse::success_with_data(detail)))
}

/// GET /api/stocks/:code/chart.svg?n=
pub async fn get_stock_chart(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Extracted<Query<ChartQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let n = query.n.unwrap_or(WATCHLIST_CHART_POINTS);
    if n > MAX_CHART_POINTS {
        return Err(AppError::InvalidInput(format!(
            "n must be at most {}",
            MAX_CHART_POINTS
        )));
    }

    let prices = blocking(&state, move |db| PriceService::recent_prices(db, &code, n)).await?;
    let svg = MiniChartRenderer::default().render(&prices);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// GET /api/stocks/:code/report
pub async fn get_stock_report(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<AiReport>>> {
    let report = blocking(&state, move |db| ReportService::latest_report(db, &code)).await?;
    Ok(Json(ApiResponse::success_with_data(report)))
}

// ============================================================================
// Search
// ============================================================================

/// GET /api/search?query=
pub async fn search_symbols(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<StockSymbol>>>> {
    let symbols = blocking(&state, move |db| SymbolService::search(db, &query.query)).await?;
    Ok(Json(ApiResponse::success_with_data(symbols)))
}

/// GET /api/autocomplete?query=
pub async fn autocomplete_symbols(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<StockSymbol>>>> {
    let symbols =
        blocking(&state, move |db| SymbolService::autocomplete(db, &query.query)).await?;
    Ok(Json(ApiResponse::success_with_data(symbols)))
}

// ============================================================================
// Market
// ============================================================================

/// GET /api/market/movers
pub async fn get_market_movers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MarketMovers>>> {
    let movers = blocking(&state, MarketService::movers).await?;
    Ok(Json(ApiResponse::success_with_data(movers)))
}

/// GET /api/market/sentiment
pub async fn get_market_sentiment(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MarketSentimentSummary>>> {
    let summary = blocking(&state, MarketService::sentiment_summary).await?;
    Ok(Json(match summary {
        Some(summary) => ApiResponse::success_with_data(summary),
        None => ApiResponse::success_with_message("No market analysis available"),
    }))
}

/// GET /api/market/sentiment-trend
pub async fn get_market_sentiment_trend(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TrendPoint>>>> {
    let today = chrono::Local::now().date_naive();
    let trend = blocking(&state, move |db| MarketService::sentiment_trend(db, today)).await?;
    Ok(Json(ApiResponse::success_with_data(trend)))
}

/// GET /api/market/sentiment-leaders
pub async fn get_sentiment_leaders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SentimentLeaders>>> {
    let leaders = blocking(&state, MarketService::sentiment_leaders).await?;
    Ok(Json(ApiResponse::success_with_data(leaders)))
}
