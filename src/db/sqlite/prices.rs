//! Price tick reads from `live_data`

use super::models::{LatestTick, PriceObservation, LATEST_TICK_COLUMNS};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Most recent `limit` priced ticks for an instrument, oldest first
pub fn recent_observations(
    conn: &Connection,
    code: &str,
    limit: usize,
) -> Result<Vec<PriceObservation>> {
    let mut stmt = conn.prepare(
        "SELECT stock_code, date, time, execution_price, price_change, volume
         FROM live_data
         WHERE stock_code = ?1 AND execution_price IS NOT NULL
         ORDER BY date DESC, time DESC, id DESC
         LIMIT ?2",
    )?;

    let mut observations = stmt
        .query_map(params![code, limit as i64], |row| {
            Ok(PriceObservation {
                instrument_code: row.get(0)?,
                date: row.get(1)?,
                time: row.get(2)?,
                execution_price: row.get(3)?,
                price_change: row.get(4)?,
                volume: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    observations.reverse();

    tracing::debug!("Loaded {} observations for {}", observations.len(), code);
    Ok(observations)
}

/// Latest tick for an instrument by `(date, time)`
pub fn latest_tick(conn: &Connection, code: &str) -> Result<Option<LatestTick>> {
    let sql = format!(
        "SELECT {} FROM live_data WHERE stock_code = ?1 ORDER BY date DESC, time DESC, id DESC LIMIT 1",
        LATEST_TICK_COLUMNS
    );

    let tick = conn
        .query_row(&sql, params![code], LatestTick::from_row)
        .optional()?;

    Ok(tick)
}

/// Whether any tick exists for the instrument
pub fn instrument_exists(conn: &Connection, code: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM live_data WHERE stock_code = ?1)",
        params![code],
        |row| row.get(0),
    )?;
    Ok(exists)
}
