//! Market Service
//!
//! Rising and falling instruments on the latest trading date, and the
//! market sentiment index: the latest market-wide analysis, its daily
//! trend, and the most promising and failing instruments by sentiment.

use crate::db::sqlite::market;
use crate::db::sqlite::models::{LatestTick, MarketAnalysis, MoverSide, ScoredTick, SentimentSide};
use crate::db::StockDb;
use crate::error::Result;
use crate::services::chart_service::MiniChartRenderer;
use crate::services::display;
use crate::services::price_service::PriceService;
use crate::services::watchlist_service::WATCHLIST_CHART_POINTS;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Candidate rows scanned per side before de-duplication
pub const MOVERS_SCAN_LIMIT: usize = 20;
/// Instruments listed per side
pub const MOVERS_LIMIT: usize = 5;

/// Days covered by the sentiment trend, counting back from the reference day
pub const TREND_DAYS: i64 = 7;
pub const PROMISING_SCORE: f64 = 75.0;
pub const FAILING_SCORE: f64 = 35.0;
pub const SENTIMENT_LEADERS_LIMIT: usize = 3;

/// One instrument in a movers list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub volume: Option<i64>,
    pub change_rate: Option<f64>,
    /// e.g. `"+1.23%"`
    pub formatted_change_rate: String,
    pub chart_markup: String,
}

impl Mover {
    fn from_tick(tick: LatestTick, chart_markup: String) -> Self {
        let change_rate = display::percentage_change(tick.price, tick.price_change);
        Mover {
            code: tick.code,
            name: tick.name,
            price: tick.price,
            price_change: tick.price_change,
            volume: tick.volume,
            change_rate,
            formatted_change_rate: display::format_percentage(change_rate),
            chart_markup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMovers {
    /// `None` when no ticks have been ingested yet
    pub reference_date: Option<NaiveDate>,
    pub rising: Vec<Mover>,
    pub falling: Vec<Mover>,
}

/// Comment shares in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentRatios {
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
}

impl SentimentRatios {
    /// All zero when there are no comments
    pub fn from_counts(positive: i64, negative: i64, neutral: i64, total: i64) -> Self {
        if total <= 0 {
            return Self::default();
        }
        let share = |count: i64| (count as f64 / total as f64 * 100.0).round() as i64;
        Self {
            positive: share(positive),
            negative: share(negative),
            neutral: share(neutral),
        }
    }
}

/// Latest market-wide sentiment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentimentSummary {
    pub analyzed_at: NaiveDateTime,
    pub score: f64,
    pub total_comments: i64,
    pub ratios: SentimentRatios,
    pub reason: Option<String>,
}

impl From<MarketAnalysis> for MarketSentimentSummary {
    fn from(analysis: MarketAnalysis) -> Self {
        Self {
            analyzed_at: analysis.date,
            score: analysis.score,
            total_comments: analysis.total_comments,
            ratios: SentimentRatios::from_counts(
                analysis.positive,
                analysis.negative,
                analysis.neutral,
                analysis.total_comments,
            ),
            reason: analysis.reason,
        }
    }
}

/// One point of the daily sentiment trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `MM-DD`
    pub label: String,
    /// Rounded to one decimal
    pub score: f64,
}

/// Instrument at either end of the sentiment scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentLeader {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub formatted_price: String,
    pub change_rate: Option<f64>,
    pub formatted_change_rate: String,
    pub score: f64,
    pub positive: Option<f64>,
    pub negative: Option<f64>,
    pub neutral: Option<f64>,
    pub reason: Option<String>,
    /// `#tag` words taken from the reason
    pub keywords: Vec<String>,
}

impl From<ScoredTick> for SentimentLeader {
    fn from(tick: ScoredTick) -> Self {
        let change_rate = display::percentage_change(tick.price, tick.price_change);
        let keywords = tick.reason.as_deref().map(extract_keywords).unwrap_or_default();
        Self {
            code: tick.code,
            name: tick.name,
            price: tick.price,
            formatted_price: display::format_optional(tick.price),
            change_rate,
            formatted_change_rate: display::format_percentage(change_rate),
            score: tick.score,
            positive: tick.positive,
            negative: tick.negative,
            neutral: tick.neutral,
            reason: tick.reason,
            keywords,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentLeaders {
    /// Latest sentiment date; `None` when nothing has been scored
    pub reference_date: Option<NaiveDate>,
    pub promising: Vec<SentimentLeader>,
    pub failing: Vec<SentimentLeader>,
}

pub struct MarketService;

impl MarketService {
    /// Top 5 rising and falling instruments, one per name, each with a mini chart
    pub fn movers(db: &StockDb) -> Result<MarketMovers> {
        db.with_conn(|conn| {
            let Some(date) = market::latest_trading_date(conn)? else {
                return Ok(MarketMovers {
                    reference_date: None,
                    rising: Vec::new(),
                    falling: Vec::new(),
                });
            };

            let rising = market::top_movers(conn, date, MoverSide::Rising, MOVERS_SCAN_LIMIT)?;
            let falling = market::top_movers(conn, date, MoverSide::Falling, MOVERS_SCAN_LIMIT)?;

            Ok(MarketMovers {
                reference_date: Some(date),
                rising: Self::chart_movers(conn, rising)?,
                falling: Self::chart_movers(conn, falling)?,
            })
        })
    }

    /// Latest market-wide analysis, if any run exists
    pub fn sentiment_summary(db: &StockDb) -> Result<Option<MarketSentimentSummary>> {
        let analysis = db.with_conn(market::latest_market_analysis)?;
        Ok(analysis.map(MarketSentimentSummary::from))
    }

    /// Daily average market score over the week ending on `today`
    pub fn sentiment_trend(db: &StockDb, today: NaiveDate) -> Result<Vec<TrendPoint>> {
        let since = today - Duration::days(TREND_DAYS);
        let scores = db.with_conn(|conn| market::daily_market_scores(conn, since))?;

        tracing::debug!("Sentiment trend since {}: {} days", since, scores.len());
        Ok(scores
            .into_iter()
            .map(|day| TrendPoint {
                date: day.date,
                label: day.date.format("%m-%d").to_string(),
                score: (day.score * 10.0).round() / 10.0,
            })
            .collect())
    }

    /// Top 3 promising and failing instruments on the latest sentiment date
    pub fn sentiment_leaders(db: &StockDb) -> Result<SentimentLeaders> {
        db.with_conn(|conn| {
            let Some(date) = market::latest_sentiment_date(conn)? else {
                return Ok(SentimentLeaders {
                    reference_date: None,
                    promising: Vec::new(),
                    failing: Vec::new(),
                });
            };

            let promising = market::sentiment_leaders(
                conn,
                date,
                SentimentSide::Promising,
                PROMISING_SCORE,
                SENTIMENT_LEADERS_LIMIT,
            )?;
            let failing = market::sentiment_leaders(
                conn,
                date,
                SentimentSide::Failing,
                FAILING_SCORE,
                SENTIMENT_LEADERS_LIMIT,
            )?;

            Ok(SentimentLeaders {
                reference_date: Some(date),
                promising: promising.into_iter().map(SentimentLeader::from).collect(),
                failing: failing.into_iter().map(SentimentLeader::from).collect(),
            })
        })
    }

    /// Keep the first tick per display name, up to the list size, and chart each
    fn chart_movers(conn: &Connection, ticks: Vec<LatestTick>) -> Result<Vec<Mover>> {
        let renderer = MiniChartRenderer::default();
        let mut seen = HashSet::new();
        let mut movers = Vec::with_capacity(MOVERS_LIMIT);

        for tick in ticks {
            if movers.len() >= MOVERS_LIMIT {
                break;
            }
            if !seen.insert(tick.name.clone()) {
                continue;
            }
            let prices = PriceService::recent_prices_on(conn, &tick.code, WATCHLIST_CHART_POINTS)?;
            movers.push(Mover::from_tick(tick, renderer.render(&prices)));
        }

        Ok(movers)
    }
}

/// Words of `reason` starting with `#`, commas treated as spaces
fn extract_keywords(reason: &str) -> Vec<String> {
    reason
        .replace(',', " ")
        .split_whitespace()
        .filter(|word| word.starts_with('#'))
        .map(str::to_string)
        .collect()
}
