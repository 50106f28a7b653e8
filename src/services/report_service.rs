//! AI Report Service

use crate::db::sqlite::analysis;
use crate::db::sqlite::models::AiReport;
use crate::db::StockDb;
use crate::error::{AppError, Result};
use crate::services::instrument::normalize_code;

pub struct ReportService;

impl ReportService {
    /// Latest AI report for an instrument
    pub fn latest_report(db: &StockDb, code: &str) -> Result<AiReport> {
        let code = normalize_code(code)?;

        db.with_conn(|conn| analysis::latest_report(conn, &code))?
            .ok_or_else(|| AppError::NotFound(format!("AI report for {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_support::open_test_db;

    #[test]
    fn test_latest_report_by_short_code() {
        let (_dir, db) = open_test_db();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO stock_keywords (stock_code, date, report, position) VALUES ('005930', '2025-07-29', '## Outlook', 'positive')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let report = ReportService::latest_report(&db, "5930").unwrap();
        assert_eq!(report.report_markdown, "## Outlook");

        assert!(matches!(
            ReportService::latest_report(&db, "000660"),
            Err(AppError::NotFound(_))
        ));
    }
}
