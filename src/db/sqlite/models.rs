//! SQLite database models

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// One price tick from `live_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub instrument_code: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub execution_price: f64,
    pub price_change: Option<f64>,
    pub volume: Option<i64>,
}

/// Watchlist entry; `(user_id, instrument_code)` is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub user_id: i64,
    pub instrument_code: String,
}

/// Most recent tick of one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestTick {
    pub code: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub volume: Option<i64>,
}

/// Column list matching [`LatestTick::from_row`]
pub(crate) const LATEST_TICK_COLUMNS: &str =
    "stock_code, stock_name, date, time, execution_price, price_change, volume";

impl LatestTick {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            code: row.get(0)?,
            name: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            price: row.get(4)?,
            price_change: row.get(5)?,
            volume: row.get(6)?,
        })
    }
}

/// Watchlist entry joined with its latest tick, if any tick exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistTick {
    pub code: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub volume: Option<i64>,
}

/// News headline for an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub date: NaiveDate,
    pub title: String,
    pub link: String,
}

/// Computed sentiment for an instrument on a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub date: NaiveDate,
    pub score: f64,
    pub positive: Option<f64>,
    pub negative: Option<f64>,
    pub neutral: Option<f64>,
    pub reason: Option<String>,
}

/// AI-generated report (markdown) with its market position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiReport {
    pub code: String,
    pub date: NaiveDate,
    pub report_markdown: String,
    pub position: Option<String>,
}

/// Searchable instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSymbol {
    pub name: String,
    pub code: String,
}

/// Which side of the market a mover query selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverSide {
    Rising,
    Falling,
}

/// One market-wide sentiment analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub date: NaiveDateTime,
    pub score: f64,
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
    pub total_comments: i64,
    pub reason: Option<String>,
}

/// Average market score for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub score: f64,
}

/// Instrument sentiment joined with its latest tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTick {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub score: f64,
    pub positive: Option<f64>,
    pub negative: Option<f64>,
    pub neutral: Option<f64>,
    pub reason: Option<String>,
}

/// Which end of the sentiment scale a leaders query selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentSide {
    /// Score at or above the promising threshold, best first
    Promising,
    /// Score at or below the failing threshold, worst first
    Failing,
}
