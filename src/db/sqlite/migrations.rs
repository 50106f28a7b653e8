//! SQLite database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    // Create migrations table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    run_migration(conn, "001_users", CREATE_USERS_TABLE)?;
    run_migration(conn, "002_live_data", CREATE_LIVE_DATA_TABLE)?;
    run_migration(conn, "003_prefer_stock", CREATE_PREFER_STOCK_TABLE)?;
    run_migration(conn, "004_company_news", CREATE_COMPANY_NEWS_TABLE)?;
    run_migration(conn, "005_stock_sentiment", CREATE_STOCK_SENTIMENT_TABLE)?;
    run_migration(conn, "006_stock_keywords", CREATE_STOCK_KEYWORDS_TABLE)?;
    run_migration(conn, "007_market_analysis", CREATE_MARKET_ANALYSIS_TABLE)?;

    tracing::info!("Database migrations completed");
    Ok(())
}

fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM migrations WHERE name = ?)",
        [name],
        |row| row.get(0),
    )?;

    if !exists {
        tracing::info!("Running migration: {}", name);
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO migrations (name) VALUES (?)", [name])?;
    }

    Ok(())
}

// Accounts are managed by the auth service; only the id is referenced here.
const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    userid TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

// Written by the ingestion process, never updated in place.
const CREATE_LIVE_DATA_TABLE: &str = r#"
CREATE TABLE live_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_code TEXT NOT NULL,
    stock_name TEXT NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    execution_price REAL,
    price_change REAL,
    volume INTEGER
);
CREATE INDEX IF NOT EXISTS idx_live_data_code_ts ON live_data(stock_code, date, time);
CREATE INDEX IF NOT EXISTS idx_live_data_date ON live_data(date);
CREATE INDEX IF NOT EXISTS idx_live_data_name ON live_data(stock_name);
"#;

const CREATE_PREFER_STOCK_TABLE: &str = r#"
CREATE TABLE prefer_stock (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    stock_code TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(user_id, stock_code)
);
"#;

const CREATE_COMPANY_NEWS_TABLE: &str = r#"
CREATE TABLE company_news (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_name TEXT NOT NULL,
    date TEXT NOT NULL,
    title TEXT NOT NULL,
    link TEXT NOT NULL,
    content TEXT
);
CREATE INDEX IF NOT EXISTS idx_company_news_name_date ON company_news(stock_name, date);
"#;

const CREATE_STOCK_SENTIMENT_TABLE: &str = r#"
CREATE TABLE stock_sentiment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_code TEXT NOT NULL,
    date TEXT NOT NULL,
    score REAL NOT NULL,
    positive REAL,
    negative REAL,
    neutral REAL,
    reason TEXT
);
CREATE INDEX IF NOT EXISTS idx_stock_sentiment_code_date ON stock_sentiment(stock_code, date);
"#;

const CREATE_STOCK_KEYWORDS_TABLE: &str = r#"
CREATE TABLE stock_keywords (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_code TEXT NOT NULL,
    date TEXT NOT NULL,
    report TEXT,
    position TEXT
);
CREATE INDEX IF NOT EXISTS idx_stock_keywords_code_date ON stock_keywords(stock_code, date);
"#;

// Market-wide sentiment per analysis run; `date` is 'YYYY-MM-DD HH:MM:SS'.
const CREATE_MARKET_ANALYSIS_TABLE: &str = r#"
CREATE TABLE market_analysis (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    score REAL NOT NULL,
    positive INTEGER NOT NULL DEFAULT 0,
    negative INTEGER NOT NULL DEFAULT 0,
    neutral INTEGER NOT NULL DEFAULT 0,
    total_comments INTEGER NOT NULL DEFAULT 0,
    reason TEXT
);
CREATE INDEX IF NOT EXISTS idx_market_analysis_date ON market_analysis(date);
"#;
