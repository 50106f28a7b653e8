//! Application state management

use crate::config::AppConfig;
use crate::db::StockDb;
use crate::error::Result;
use std::sync::Arc;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Pooled SQLite database
    pub db: Arc<StockDb>,

    pub config: AppConfig,
}

impl AppState {
    /// Create application state, opening the database named by `config`
    pub fn new(config: AppConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!("Database path: {:?}", config.database_path);
        let db = StockDb::open(&config.database_path, config.pool_size)?;

        Ok(Self::with_db(Arc::new(db), config))
    }

    /// Wrap an already opened database
    pub fn with_db(db: Arc<StockDb>, config: AppConfig) -> Self {
        Self { db, config }
    }
}
