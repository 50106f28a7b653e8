//! Symbol Service
//!
//! Search and autocomplete over instrument names and codes.

use crate::db::sqlite::models::StockSymbol;
use crate::db::sqlite::symbol;
use crate::db::StockDb;
use crate::error::Result;

pub const SEARCH_LIMIT: usize = 50;
pub const AUTOCOMPLETE_LIMIT: usize = 10;

/// Symbol service for business logic
pub struct SymbolService;

impl SymbolService {
    /// Instruments whose name or code contains `query` (at most 50)
    pub fn search(db: &StockDb, query: &str) -> Result<Vec<StockSymbol>> {
        Self::lookup(db, query, SEARCH_LIMIT)
    }

    /// Short suggestion list for type-ahead (at most 10)
    pub fn autocomplete(db: &StockDb, query: &str) -> Result<Vec<StockSymbol>> {
        Self::lookup(db, query, AUTOCOMPLETE_LIMIT)
    }

    fn lookup(db: &StockDb, query: &str, limit: usize) -> Result<Vec<StockSymbol>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let symbols = db.with_conn(|conn| symbol::search_symbols(conn, query, limit))?;
        tracing::debug!("Symbol lookup '{}' matched {}", query, symbols.len());
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_support::{insert_tick, open_test_db};

    #[test]
    fn test_blank_query_returns_nothing() {
        let (_dir, db) = open_test_db();
        insert_tick(&db, "005930", "Samsung", "2025-07-01", "09:00:00", Some(1.0), None, None);
        assert!(SymbolService::search(&db, "   ").unwrap().is_empty());
    }

    #[test]
    fn test_autocomplete_is_capped() {
        let (_dir, db) = open_test_db();
        for i in 0..15 {
            insert_tick(
                &db,
                &format!("{:06}", i + 1),
                &format!("Fund {:02}", i),
                "2025-07-01",
                "09:00:00",
                Some(1.0),
                None,
                None,
            );
        }

        assert_eq!(SymbolService::autocomplete(&db, "fund").unwrap().len(), AUTOCOMPLETE_LIMIT);
        assert_eq!(SymbolService::search(&db, "fund").unwrap().len(), 15);
    }
}
