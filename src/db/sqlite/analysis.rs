//! Computed sentiment and AI report reads
//!
//! Both tables are filled by the offline analysis pipeline.

use super::models::{AiReport, SentimentScore};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Latest sentiment row for an instrument
pub fn latest_sentiment(conn: &Connection, code: &str) -> Result<Option<SentimentScore>> {
    let score = conn
        .query_row(
            "SELECT date, score, positive, negative, neutral, reason
             FROM stock_sentiment
             WHERE stock_code = ?1
             ORDER BY date DESC, id DESC
             LIMIT 1",
            params![code],
            |row| {
                Ok(SentimentScore {
                    date: row.get(0)?,
                    score: row.get(1)?,
                    positive: row.get(2)?,
                    negative: row.get(3)?,
                    neutral: row.get(4)?,
                    reason: row.get(5)?,
                })
            },
        )
        .optional()?;

    Ok(score)
}

/// Latest non-empty AI report for an instrument
pub fn latest_report(conn: &Connection, code: &str) -> Result<Option<AiReport>> {
    let report = conn
        .query_row(
            "SELECT stock_code, date, report, position
             FROM stock_keywords
             WHERE stock_code = ?1 AND report IS NOT NULL AND TRIM(report) <> ''
             ORDER BY date DESC, id DESC
             LIMIT 1",
            params![code],
            |row| {
                Ok(AiReport {
                    code: row.get(0)?,
                    date: row.get(1)?,
                    report_markdown: row.get(2)?,
                    position: row.get(3)?,
                })
            },
        )
        .optional()?;

    Ok(report)
}
