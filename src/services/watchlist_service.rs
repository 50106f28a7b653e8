//! Watchlist Service
//!
//! Builds the per-user watchlist view (latest price, signed change, volume
//! and a mini chart per instrument) and edits watchlist entries.
//! Rows are recomputed on every call; nothing is cached.

use crate::db::sqlite::models::{WatchlistEntry, WatchlistTick};
use crate::db::sqlite::{prices, watchlist};
use crate::db::StockDb;
use crate::error::{AppError, Result};
use crate::services::chart_service::MiniChartRenderer;
use crate::services::display::{self, Direction, NOT_AVAILABLE};
use crate::services::instrument::normalize_code;
use crate::services::price_service::PriceService;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Prices drawn in each watchlist mini chart
pub const WATCHLIST_CHART_POINTS: usize = 7;

/// One watchlist row, ready for templates and the JSON API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub name: String,
    pub code: String,
    pub formatted_price: String,
    pub formatted_change: String,
    /// `None` when the latest tick carries no change
    pub direction: Option<Direction>,
    pub color_class: String,
    pub formatted_volume: String,
    pub chart_markup: String,
}

/// Result of adding an instrument to a watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Watchlist service for business logic
pub struct WatchlistService;

impl WatchlistService {
    /// Display rows for every instrument on the user's watchlist.
    ///
    /// An unknown user or an empty watchlist yields an empty list.
    pub fn build_display(db: &StockDb, user_id: i64) -> Result<Vec<DisplayRow>> {
        let renderer = MiniChartRenderer::default();

        let rows = db.with_conn(|conn| {
            let ticks = watchlist::latest_ticks_for_user(conn, user_id)?;

            ticks
                .into_iter()
                .map(|tick| -> Result<DisplayRow> {
                    let prices =
                        PriceService::recent_prices_on(conn, &tick.code, WATCHLIST_CHART_POINTS)?;
                    Ok(Self::to_display_row(tick, renderer.render(&prices)))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        tracing::debug!("Built {} watchlist rows for user {}", rows.len(), user_id);
        Ok(rows)
    }

    /// Add an instrument to a user's watchlist
    pub fn add(db: &StockDb, user_id: i64, code: &str) -> Result<AddOutcome> {
        let code = normalize_code(code)?;
        info!("WatchlistService::add - user {} {}", user_id, code);

        db.with_conn(|conn| {
            if !watchlist::user_exists(conn, user_id)? {
                return Err(AppError::NotFound(format!("User {}", user_id)));
            }
            if !prices::instrument_exists(conn, &code)? {
                return Err(AppError::NotFound(format!("Instrument {}", code)));
            }

            let entry = WatchlistEntry {
                user_id,
                instrument_code: code.clone(),
            };
            if watchlist::insert_entry(conn, &entry)? {
                Ok(AddOutcome::Added)
            } else {
                Ok(AddOutcome::AlreadyPresent)
            }
        })
    }

    /// Remove an instrument; returns whether it was on the watchlist
    pub fn remove(db: &StockDb, user_id: i64, code: &str) -> Result<bool> {
        let code = normalize_code(code)?;
        info!("WatchlistService::remove - user {} {}", user_id, code);

        let entry = WatchlistEntry {
            user_id,
            instrument_code: code,
        };
        db.with_conn(|conn| watchlist::delete_entry(conn, &entry))
    }

    fn to_display_row(tick: WatchlistTick, chart_markup: String) -> DisplayRow {
        let direction = tick.price_change.map(Direction::from_change);

        DisplayRow {
            name: tick.name.unwrap_or_else(|| tick.code.clone()),
            code: tick.code,
            formatted_price: display::format_optional(tick.price),
            formatted_change: display::format_change(tick.price_change),
            direction,
            color_class: direction
                .map(|d| d.color_class().to_string())
                .unwrap_or_default(),
            formatted_volume: tick
                .volume
                .map(display::format_count)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            chart_markup,
        }
    }
}
