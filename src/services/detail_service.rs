//! Stock Detail Service
//!
//! Assembles the detail panel for one instrument: latest tick, percentage
//! change, recent headlines, a 30-point price series with its chart, and
//! the latest computed sentiment.

use crate::db::sqlite::models::{NewsHeadline, SentimentScore};
use crate::db::sqlite::{analysis, news, prices};
use crate::db::StockDb;
use crate::error::{AppError, Result};
use crate::services::chart_service::{ChartOptions, MiniChartRenderer};
use crate::services::display::{self, Direction};
use crate::services::instrument::normalize_code;
use crate::services::price_service::PriceService;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Headlines included in a detail payload
pub const DETAIL_NEWS_LIMIT: usize = 5;
/// Prices included in the detail chart
pub const DETAIL_CHART_POINTS: usize = 30;

/// Sentiment section of the detail payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SentimentStatus {
    Available(SentimentScore),
    /// No computed sentiment exists for the instrument yet
    Missing,
}

/// Detail view of a single instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub percentage_change: Option<f64>,
    pub formatted_percentage_change: String,
    pub volume: Option<i64>,
    pub direction: Option<Direction>,
    pub change_icon: String,
    pub change_color_class: String,
    /// Recent prices, oldest first
    pub chart_data: Vec<f64>,
    pub chart_markup: String,
    pub news: Vec<NewsHeadline>,
    pub sentiment: SentimentStatus,
}

/// Stock detail service for business logic
pub struct DetailService;

impl DetailService {
    /// Assemble the detail payload, or `NotFound` when the instrument has no tick
    pub fn assemble_detail(db: &StockDb, code: &str) -> Result<DetailPayload> {
        let code = normalize_code(code)?;
        info!("DetailService::assemble_detail - {}", code);

        db.with_conn(|conn| {
            let tick = prices::latest_tick(conn, &code)?
                .ok_or_else(|| AppError::NotFound(format!("Instrument {}", code)))?;

            let headlines = news::recent_headlines(conn, &tick.name, DETAIL_NEWS_LIMIT)?;
            let chart_data = PriceService::recent_prices_on(conn, &code, DETAIL_CHART_POINTS)?;
            let sentiment = match analysis::latest_sentiment(conn, &code)? {
                Some(score) => SentimentStatus::Available(score),
                None => SentimentStatus::Missing,
            };

            let percentage_change = display::percentage_change(tick.price, tick.price_change);
            let direction = tick.price_change.map(Direction::from_change);
            let chart_markup = MiniChartRenderer::new(ChartOptions::DETAIL).render(&chart_data);

            Ok(DetailPayload {
                code: tick.code,
                name: tick.name,
                price: tick.price,
                price_change: tick.price_change,
                percentage_change,
                formatted_percentage_change: display::format_percentage(percentage_change),
                volume: tick.volume,
                direction,
                change_icon: direction.map(|d| d.glyph().to_string()).unwrap_or_default(),
                change_color_class: direction
                    .map(|d| d.color_class().to_string())
                    .unwrap_or_default(),
                chart_data,
                chart_markup,
                news: headlines,
                sentiment,
            })
        })
    }
}
