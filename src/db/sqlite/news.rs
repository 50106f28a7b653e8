//! Company news reads

use super::models::NewsHeadline;
use crate::error::Result;
use rusqlite::{params, Connection};

/// Most recent headlines for an instrument display name, newest first
pub fn recent_headlines(
    conn: &Connection,
    stock_name: &str,
    limit: usize,
) -> Result<Vec<NewsHeadline>> {
    let mut stmt = conn.prepare(
        "SELECT date, title, link
         FROM company_news
         WHERE stock_name = ?1
         ORDER BY date DESC, id DESC
         LIMIT ?2",
    )?;

    let headlines = stmt
        .query_map(params![stock_name, limit as i64], |row| {
            Ok(NewsHeadline {
                date: row.get(0)?,
                title: row.get(1)?,
                link: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(headlines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_support::open_test_db;

    #[test]
    fn test_recent_headlines_newest_first_and_limited() {
        let (_dir, db) = open_test_db();
        db.with_conn(|conn| {
            for day in 1..=7 {
                conn.execute(
                    "INSERT INTO company_news (stock_name, date, title, link) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        "Samsung",
                        format!("2025-07-0{}", day),
                        format!("headline {}", day),
                        format!("https://news.example/{}", day)
                    ],
                )?;
            }
            conn.execute(
                "INSERT INTO company_news (stock_name, date, title, link) VALUES ('Hynix', '2025-07-09', 'other', 'x')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let headlines = db
            .with_conn(|conn| recent_headlines(conn, "Samsung", 5))
            .unwrap();

        let titles: Vec<&str> = headlines.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["headline 7", "headline 6", "headline 5", "headline 4", "headline 3"]
        );
    }
}
