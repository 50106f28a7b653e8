//! Storage layer
//!
//! SQLite holds price ticks, watchlists, news and computed sentiment.

pub mod sqlite;

pub use sqlite::StockDb;
