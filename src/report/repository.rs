//! Repository for issue report persistence

use rusqlite::params;
use serde_json::Value;
use tracing::debug;

use super::db::ReportDb;
use super::models::IssueReport;

/// Errors from the issue report store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Append-only repository for issue reports
pub struct IssueReportRepository {
    db: ReportDb,
}

impl IssueReportRepository {
    pub fn new(db: ReportDb) -> Self {
        Self { db }
    }

    /// Persist a report, returning the new row id.
    ///
    /// The insert is a single statement inside its own transaction, so it
    /// either fully succeeds or leaves no trace.
    pub fn append(&self, report: &IssueReport) -> Result<i64, StorageError> {
        let issues_json = serde_json::to_string(&report.issues)?;
        let chat_json = serde_json::to_string(&report.chat)?;
        let settings_json = serde_json::to_string(&report.settings)?;

        let conn = self.db.conn();
        conn.execute(
            r#"
            INSERT INTO issue_reports (issues_json, chat_json, settings_json, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                issues_json,
                chat_json,
                settings_json,
                report.user,
                report.created_at,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Stored issue report #{}", id);
        Ok(id)
    }

    /// Number of stored reports
    pub fn count(&self) -> Result<i64, StorageError> {
        let conn = self.db.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM issue_reports", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Most recent reports, newest first
    pub fn list_recent(&self, limit: usize) -> Result<Vec<IssueReport>, StorageError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, issues_json, chat_json, settings_json, user_id, created_at
            FROM issue_reports
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let reports = stmt
            .query_map(params![limit as i64], |row| Ok(Self::row_to_report(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(reports)
    }

    // Helper to convert a row to an IssueReport
    fn row_to_report(row: &rusqlite::Row) -> IssueReport {
        IssueReport {
            id: row.get(0).ok(),
            issues: row
                .get::<_, String>(1)
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            chat: row
                .get::<_, String>(2)
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            settings: row
                .get::<_, Option<String>>(3)
                .ok()
                .flatten()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or(Value::Null),
            user: row.get(4).ok().flatten(),
            created_at: row.get(5).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::{ChatSnapshot, IssueSummary};
    use crate::session::{Correctness, IssueTag};
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_report(conv_id: &str, created_at: i64) -> IssueReport {
        IssueReport {
            id: None,
            issues: IssueSummary {
                correctness: Some(Correctness::Incorrect),
                issues: vec![IssueTag::Offensive],
                more_detail: "bad".to_string(),
            },
            chat: ChatSnapshot {
                conv_id: conv_id.to_string(),
                chat_history: json!([["q", "a"]]),
                info_panel: "evidence".to_string(),
                chat_state: json!({}),
                selecteds: Default::default(),
            },
            settings: json!({"pipeline": "vector", "retrieval_expansion": true}),
            user: Some(7),
            created_at,
        }
    }

    #[test]
    fn append_then_list_roundtrip() {
        let dir = tempdir().unwrap();
        let db = ReportDb::open(&dir.path().join("reports.db")).unwrap();
        let repo = IssueReportRepository::new(db);

        let id = repo.append(&sample_report("conv-1", 1_000)).unwrap();
        repo.append(&sample_report("conv-2", 2_000)).unwrap();

        assert!(id > 0);
        assert_eq!(repo.count().unwrap(), 2);

        let recent = repo.list_recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].chat.conv_id, "conv-2");
        assert_eq!(recent[1].chat.conv_id, "conv-1");
        assert_eq!(recent[1].issues.correctness, Some(Correctness::Incorrect));
        assert_eq!(recent[1].user, Some(7));
    }

    #[test]
    fn issues_column_holds_wire_encoding() {
        let dir = tempdir().unwrap();
        let db = ReportDb::open(&dir.path().join("reports.db")).unwrap();
        let repo = IssueReportRepository::new(db.clone());

        repo.append(&sample_report("conv-1", 1_000)).unwrap();

        let conn = db.conn();
        let issues_json: String = conn
            .query_row("SELECT issues_json FROM issue_reports", [], |row| {
                row.get(0)
            })
            .unwrap();

        let stored: serde_json::Value = serde_json::from_str(&issues_json).unwrap();
        assert_eq!(
            stored,
            json!({"correctness": "incorrect", "issues": ["offensive"], "more_detail": "bad"})
        );
    }

    #[test]
    fn list_recent_respects_limit() {
        let dir = tempdir().unwrap();
        let db = ReportDb::open(&dir.path().join("reports.db")).unwrap();
        let repo = IssueReportRepository::new(db);

        for i in 0..5 {
            repo.append(&sample_report(&format!("conv-{}", i), i)).unwrap();
        }

        assert_eq!(repo.list_recent(3).unwrap().len(), 3);
    }
}
