//! Market-wide reads: latest trading date, top movers and the market
//! sentiment index

use super::models::{
    DailyScore, LatestTick, MarketAnalysis, MoverSide, ScoredTick, SentimentSide,
    LATEST_TICK_COLUMNS,
};
use crate::error::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

/// Most recent date present in `live_data`
pub fn latest_trading_date(conn: &Connection) -> Result<Option<NaiveDate>> {
    let date: Option<NaiveDate> =
        conn.query_row("SELECT MAX(date) FROM live_data", [], |row| row.get(0))?;
    Ok(date)
}

/// Latest tick per instrument on `date`, filtered and ordered by side
///
/// Rising: positive change, highest volume first.
/// Falling: negative change, lowest volume first.
pub fn top_movers(
    conn: &Connection,
    date: NaiveDate,
    side: MoverSide,
    limit: usize,
) -> Result<Vec<LatestTick>> {
    let (filter, order) = match side {
        MoverSide::Rising => ("price_change > 0", "volume DESC, price_change DESC"),
        MoverSide::Falling => ("price_change < 0", "volume ASC, price_change ASC"),
    };

    let sql = format!(
        r#"
        SELECT {columns}
        FROM (
            SELECT *, ROW_NUMBER() OVER (
                PARTITION BY stock_code ORDER BY time DESC, id DESC
            ) AS rn
            FROM live_data
            WHERE date = ?1
        )
        WHERE rn = 1 AND {filter}
        ORDER BY {order}, stock_code
        LIMIT ?2
        "#,
        columns = LATEST_TICK_COLUMNS,
        filter = filter,
        order = order,
    );

    let mut stmt = conn.prepare(&sql)?;
    let ticks = stmt
        .query_map(params![date, limit as i64], LatestTick::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(ticks)
}

/// Most recent market-wide analysis run
pub fn latest_market_analysis(conn: &Connection) -> Result<Option<MarketAnalysis>> {
    let analysis = conn
        .query_row(
            "SELECT date, score, positive, negative, neutral, total_comments, reason
             FROM market_analysis
             ORDER BY date DESC, id DESC
             LIMIT 1",
            [],
            |row| {
                Ok(MarketAnalysis {
                    date: row.get(0)?,
                    score: row.get(1)?,
                    positive: row.get(2)?,
                    negative: row.get(3)?,
                    neutral: row.get(4)?,
                    total_comments: row.get(5)?,
                    reason: row.get(6)?,
                })
            },
        )
        .optional()?;

    Ok(analysis)
}

/// Average market score per day from `since` onwards, oldest first
pub fn daily_market_scores(conn: &Connection, since: NaiveDate) -> Result<Vec<DailyScore>> {
    let mut stmt = conn.prepare(
        "SELECT DATE(date) AS day, AVG(score)
         FROM market_analysis
         WHERE DATE(date) >= ?1
         GROUP BY day
         ORDER BY day ASC",
    )?;

    let scores = stmt
        .query_map(params![since], |row| {
            Ok(DailyScore {
                date: row.get(0)?,
                score: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(scores)
}

/// Most recent date present in `stock_sentiment`
pub fn latest_sentiment_date(conn: &Connection) -> Result<Option<NaiveDate>> {
    let date: Option<NaiveDate> =
        conn.query_row("SELECT MAX(date) FROM stock_sentiment", [], |row| row.get(0))?;
    Ok(date)
}

/// Instruments scored on `date` beyond `threshold`, joined with their latest tick
///
/// Promising: `score >= threshold`, highest first.
/// Failing: `score <= threshold`, lowest first.
/// Instruments without any tick are left out.
pub fn sentiment_leaders(
    conn: &Connection,
    date: NaiveDate,
    side: SentimentSide,
    threshold: f64,
    limit: usize,
) -> Result<Vec<ScoredTick>> {
    let (filter, order) = match side {
        SentimentSide::Promising => ("s.score >= ?2", "s.score DESC"),
        SentimentSide::Failing => ("s.score <= ?2", "s.score ASC"),
    };

    let sql = format!(
        r#"
        SELECT s.stock_code, t.stock_name, t.execution_price, t.price_change,
               s.score, s.positive, s.negative, s.neutral, s.reason
        FROM stock_sentiment AS s
        JOIN (
            SELECT *, ROW_NUMBER() OVER (
                PARTITION BY stock_code ORDER BY date DESC, time DESC, id DESC
            ) AS rn
            FROM live_data
        ) AS t ON t.stock_code = s.stock_code AND t.rn = 1
        WHERE s.date = ?1 AND {filter}
        ORDER BY {order}, s.stock_code
        LIMIT ?3
        "#,
        filter = filter,
        order = order,
    );

    let mut stmt = conn.prepare(&sql)?;
    let leaders = stmt
        .query_map(params![date, threshold, limit as i64], |row| {
            Ok(ScoredTick {
                code: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                price_change: row.get(3)?,
                score: row.get(4)?,
                positive: row.get(5)?,
                negative: row.get(6)?,
                neutral: row.get(7)?,
                reason: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(leaders)
}
