//! Price Service
//!
//! Recent price series for charts.

use crate::db::sqlite::prices;
use crate::db::StockDb;
use crate::error::{AppError, Result};
use crate::services::instrument::normalize_code;
use rusqlite::Connection;

/// Price series reader
pub struct PriceService;

impl PriceService {
    /// Up to `n` most recent prices of an instrument, oldest first
    pub fn recent_prices(db: &StockDb, code: &str, n: usize) -> Result<Vec<f64>> {
        db.with_conn(|conn| Self::recent_prices_on(conn, code, n))
    }

    /// Same as [`PriceService::recent_prices`] on an already checked-out connection
    pub fn recent_prices_on(conn: &Connection, code: &str, n: usize) -> Result<Vec<f64>> {
        if n == 0 {
            return Err(AppError::InvalidInput(
                "Number of prices must be positive".to_string(),
            ));
        }
        let code = normalize_code(code)?;

        let observations = prices::recent_observations(conn, &code, n)?;
        Ok(observations
            .into_iter()
            .map(|o| o.execution_price)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_support::{insert_tick, open_test_db};

    #[test]
    fn test_recent_prices_never_exceed_n() {
        let (_dir, db) = open_test_db();
        for minute in 0..10 {
            insert_tick(
                &db,
                "005930",
                "Samsung",
                "2025-07-01",
                &format!("09:{:02}:00", minute),
                Some(100.0 + minute as f64),
                None,
                None,
            );
        }

        for n in 1..=12 {
            let prices = PriceService::recent_prices(&db, "5930", n).unwrap();
            assert_eq!(prices.len(), n.min(10));
            assert_eq!(*prices.last().unwrap(), 109.0);
        }
    }

    #[test]
    fn test_recent_prices_rejects_bad_input() {
        let (_dir, db) = open_test_db();
        assert!(matches!(
            PriceService::recent_prices(&db, "005930", 0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            PriceService::recent_prices(&db, "not-a-code", 7),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_instrument_has_empty_series() {
        let (_dir, db) = open_test_db();
        assert!(PriceService::recent_prices(&db, "000001", 7).unwrap().is_empty());
    }
}
