//! SQLite database module
//!
//! Every read and write checks a connection out of the pool through
//! [`StockDb::with_conn`]; the connection goes back to the pool when the
//! closure returns, on success and on error alike.

pub mod models;
mod migrations;
pub mod prices;
pub mod watchlist;
pub mod news;
pub mod analysis;
pub mod symbol;
pub mod market;

use crate::error::Result;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// Pooled SQLite database
pub struct StockDb {
    pool: DbPool,
}

impl StockDb {
    /// Open (or create) the database at `path` and run migrations
    pub fn open(path: &Path, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            // WAL lets readers proceed while the ingestion process writes
            conn.execute_batch(
                "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
            )
        });

        let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;
        let db = Self { pool };

        db.run_migrations()?;
        tracing::info!("Opened database at {:?} (pool size {})", path, pool_size);

        Ok(db)
    }

    /// Run `f` with a pooled connection
    pub fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.pool.get()?;
        f(&conn)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        self.with_conn(migrations::run_migrations)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Seeding helpers for storage and service tests

    use super::StockDb;
    use rusqlite::params;
    use tempfile::TempDir;

    pub fn open_test_db() -> (TempDir, StockDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = StockDb::open(&dir.path().join("test.db"), 2).unwrap();
        (dir, db)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert_tick(
        db: &StockDb,
        code: &str,
        name: &str,
        date: &str,
        time: &str,
        price: Option<f64>,
        change: Option<f64>,
        volume: Option<i64>,
    ) {
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO live_data (stock_code, stock_name, date, time, execution_price, price_change, volume)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![code, name, date, time, price, change, volume],
            )?;
            Ok(())
        })
        .unwrap();
    }

    pub fn insert_user(db: &StockDb, userid: &str) -> i64 {
        db.with_conn(|conn| {
            conn.execute("INSERT INTO users (userid) VALUES (?1)", params![userid])?;
            Ok(conn.last_insert_rowid())
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::error::AppError;

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stocklens.db");

        let first = super::StockDb::open(&path, 1).unwrap();
        drop(first);
        let second = super::StockDb::open(&path, 1).unwrap();

        let applied: i64 = second
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM migrations", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(applied, 7);
    }

    #[test]
    fn test_with_conn_surfaces_sql_errors_as_storage_unavailable() {
        let (_dir, db) = open_test_db();
        let result: crate::error::Result<i64> = db.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM missing_table", [], |row| row.get(0))?)
        });
        assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
    }

    #[test]
    fn test_connection_is_returned_after_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = super::StockDb::open(&dir.path().join("one.db"), 1).unwrap();

        let _ = db.with_conn(|conn| {
            conn.execute("INSERT INTO nowhere VALUES (1)", [])?;
            Ok(())
        });

        // A single-connection pool would time out here if the failed call leaked it
        let count: i64 = db
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM live_data", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
