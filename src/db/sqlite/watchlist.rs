//! Watchlist (`prefer_stock`) storage

use super::models::{WatchlistEntry, WatchlistTick};
use crate::error::Result;
use rusqlite::{params, Connection};

/// Watchlist of a user joined with the latest tick per instrument,
/// in the order the entries were added
pub fn latest_ticks_for_user(conn: &Connection, user_id: i64) -> Result<Vec<WatchlistTick>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT p.stock_code, t.stock_name, t.execution_price, t.price_change, t.volume
        FROM prefer_stock p
        LEFT JOIN (
            SELECT stock_code, stock_name, execution_price, price_change, volume,
                   ROW_NUMBER() OVER (
                       PARTITION BY stock_code ORDER BY date DESC, time DESC, id DESC
                   ) AS rn
            FROM live_data
            WHERE stock_code IN (SELECT stock_code FROM prefer_stock WHERE user_id = ?1)
        ) t ON t.stock_code = p.stock_code AND t.rn = 1
        WHERE p.user_id = ?1
        ORDER BY p.id
        "#,
    )?;

    let ticks = stmt
        .query_map(params![user_id], |row| {
            Ok(WatchlistTick {
                code: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                price_change: row.get(3)?,
                volume: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!("Loaded {} watchlist rows for user {}", ticks.len(), user_id);
    Ok(ticks)
}

/// Insert an entry; returns false when the pair already exists
pub fn insert_entry(conn: &Connection, entry: &WatchlistEntry) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO prefer_stock (user_id, stock_code) VALUES (?1, ?2)",
        params![entry.user_id, entry.instrument_code],
    )?;
    Ok(inserted > 0)
}

/// Delete an entry; returns false when nothing matched
pub fn delete_entry(conn: &Connection, entry: &WatchlistEntry) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM prefer_stock WHERE user_id = ?1 AND stock_code = ?2",
        params![entry.user_id, entry.instrument_code],
    )?;
    Ok(deleted > 0)
}

/// Whether the account exists
pub fn user_exists(conn: &Connection, user_id: i64) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_support::{insert_tick, insert_user, open_test_db};

    fn entry(user_id: i64, code: &str) -> WatchlistEntry {
        WatchlistEntry {
            user_id,
            instrument_code: code.to_string(),
        }
    }

    #[test]
    fn test_insert_is_unique_per_user_and_code() {
        let (_dir, db) = open_test_db();
        let alice = insert_user(&db, "alice");
        let bob = insert_user(&db, "bob");

        assert!(db.with_conn(|c| insert_entry(c, &entry(alice, "005930"))).unwrap());
        assert!(!db.with_conn(|c| insert_entry(c, &entry(alice, "005930"))).unwrap());
        assert!(db.with_conn(|c| insert_entry(c, &entry(bob, "005930"))).unwrap());
    }

    #[test]
    fn test_delete_reports_whether_a_row_matched() {
        let (_dir, db) = open_test_db();
        let alice = insert_user(&db, "alice");
        db.with_conn(|c| insert_entry(c, &entry(alice, "005930"))).unwrap();

        assert!(db.with_conn(|c| delete_entry(c, &entry(alice, "005930"))).unwrap());
        assert!(!db.with_conn(|c| delete_entry(c, &entry(alice, "005930"))).unwrap());
    }

    #[test]
    fn test_latest_ticks_pick_newest_tick_and_keep_insertion_order() {
        let (_dir, db) = open_test_db();
        let alice = insert_user(&db, "alice");

        insert_tick(&db, "000660", "Hynix", "2025-07-01", "09:00:00", Some(200.0), Some(-1.0), Some(5));
        insert_tick(&db, "005930", "Samsung", "2025-07-01", "09:00:00", Some(100.0), Some(1.0), Some(10));
        insert_tick(&db, "005930", "Samsung", "2025-07-02", "09:00:00", Some(110.0), Some(10.0), Some(30));
        insert_tick(&db, "005930", "Samsung", "2025-07-01", "15:30:00", Some(105.0), Some(5.0), Some(20));

        db.with_conn(|c| insert_entry(c, &entry(alice, "005930"))).unwrap();
        db.with_conn(|c| insert_entry(c, &entry(alice, "000660"))).unwrap();
        db.with_conn(|c| insert_entry(c, &entry(alice, "123456"))).unwrap();

        let ticks = db.with_conn(|c| latest_ticks_for_user(c, alice)).unwrap();
        let codes: Vec<&str> = ticks.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["005930", "000660", "123456"]);

        assert_eq!(ticks[0].price, Some(110.0));
        assert_eq!(ticks[0].volume, Some(30));
        assert_eq!(ticks[1].price_change, Some(-1.0));
        assert_eq!(ticks[2].name, None);
        assert_eq!(ticks[2].price, None);
    }

    #[test]
    fn test_user_exists() {
        let (_dir, db) = open_test_db();
        let alice = insert_user(&db, "alice");
        assert!(db.with_conn(|c| user_exists(c, alice)).unwrap());
        assert!(!db.with_conn(|c| user_exists(c, alice + 100)).unwrap());
    }
}
