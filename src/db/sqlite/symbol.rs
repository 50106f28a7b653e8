//! Instrument search over the names and codes seen in `live_data`

use super::models::StockSymbol;
use crate::error::Result;
use rusqlite::{params, Connection};

/// Search instruments whose name or code contains `query`
pub fn search_symbols(conn: &Connection, query: &str, limit: usize) -> Result<Vec<StockSymbol>> {
    let query_pattern = format!("%{}%", escape_like(query));

    let mut stmt = conn.prepare(
        r#"
        SELECT DISTINCT stock_name, stock_code
        FROM live_data
        WHERE stock_name LIKE ?1 ESCAPE '\' OR stock_code LIKE ?1 ESCAPE '\'
        ORDER BY stock_name, stock_code
        LIMIT ?2
        "#,
    )?;

    let symbols = stmt
        .query_map(params![query_pattern, limit as i64], |row| {
            Ok(StockSymbol {
                name: row.get(0)?,
                code: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(symbols)
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
