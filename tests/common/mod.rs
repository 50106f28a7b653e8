//! Shared fixtures for integration tests

#![allow(dead_code)]

use rusqlite::params;
use std::sync::Arc;
use stocklens_lib::config::AppConfig;
use stocklens_lib::db::StockDb;
use stocklens_lib::state::AppState;
use tempfile::TempDir;

/// A database in a temporary directory; removed on drop
pub struct TestStore {
    pub dir: TempDir,
    pub db: Arc<StockDb>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = StockDb::open(&dir.path().join("stocklens.db"), 4).unwrap();
        Self {
            dir,
            db: Arc::new(db),
        }
    }

    pub fn state(&self) -> AppState {
        let config = AppConfig {
            database_path: self.dir.path().join("stocklens.db"),
            ..AppConfig::default()
        };
        AppState::with_db(self.db.clone(), config)
    }

    pub fn user(&self, userid: &str) -> i64 {
        self.db
            .with_conn(|conn| {
                conn.execute("INSERT INTO users (userid) VALUES (?1)", params![userid])?;
                Ok(conn.last_insert_rowid())
            })
            .unwrap()
    }

    /// Insert one `live_data` row; `at` is `"YYYY-MM-DD HH:MM:SS"`
    pub fn tick(
        &self,
        code: &str,
        name: &str,
        at: &str,
        price: f64,
        change: Option<f64>,
        volume: Option<i64>,
    ) {
        let (date, time) = at.split_once(' ').unwrap();
        self.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO live_data (stock_code, stock_name, date, time, execution_price, price_change, volume)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![code, name, date, time, price, change, volume],
                )?;
                Ok(())
            })
            .unwrap();
    }

    pub fn news(&self, name: &str, date: &str, title: &str) {
        self.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO company_news (stock_name, date, title, link) VALUES (?1, ?2, ?3, ?4)",
                    params![name, date, title, format!("https://news.example/{}", title.len())],
                )?;
                Ok(())
            })
            .unwrap();
    }

    pub fn sentiment(&self, code: &str, date: &str, score: f64) {
        self.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO stock_sentiment (stock_code, date, score, positive, negative, neutral, reason)
                     VALUES (?1, ?2, ?3, 0.6, 0.1, 0.3, 'earnings beat')",
                    params![code, date, score],
                )?;
                Ok(())
            })
            .unwrap();
    }

    pub fn report(&self, code: &str, date: &str, markdown: &str) {
        self.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO stock_keywords (stock_code, date, report, position) VALUES (?1, ?2, ?3, 'neutral')",
                    params![code, date, markdown],
                )?;
                Ok(())
            })
            .unwrap();
    }

    /// Insert one `market_analysis` run; `at` is `"YYYY-MM-DD HH:MM:SS"`
    pub fn market_analysis(&self, at: &str, score: f64, counts: (i64, i64, i64), reason: &str) {
        self.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO market_analysis (date, score, positive, negative, neutral, total_comments, reason)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![at, score, counts.0, counts.1, counts.2, counts.0 + counts.1 + counts.2, reason],
                )?;
                Ok(())
            })
            .unwrap();
    }

    /// Drop a table out from under the services
    pub fn drop_table(&self, table: &str) {
        self.db
            .with_conn(|conn| {
                conn.execute_batch(&format!("DROP TABLE {}", table))?;
                Ok(())
            })
            .unwrap();
    }
}
