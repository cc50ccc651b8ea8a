//! SQLite database connection and schema management for issue reports
//!
//! Manages the reports database (default `~/.ragdesk/reports.db`) with a
//! schema-version table for future migration.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;

/// Database wrapper for issue report storage
#[derive(Clone)]
pub struct ReportDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ReportDb {
    /// Open or create the reports database at the default location
    /// (~/.ragdesk/reports.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Config::data_dir().join("reports.db");
        Self::open(&db_path)
    }

    /// Open or create the reports database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open reports db: {}", path.display()))?;

        // WAL keeps concurrent appends from separate sessions isolated
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Report DB lock poisoned")
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM rd_schema_version",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        // Future migrations go here
        // if version < 2 { ... }

        let _ = version;

        Ok(())
    }
}

/// SQL schema for the reports database
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS rd_schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO rd_schema_version VALUES (1);

-- Issue reports (one row per submitted report, append-only)
CREATE TABLE IF NOT EXISTS issue_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issues_json TEXT NOT NULL,              -- correctness, tags, free text
    chat_json TEXT NOT NULL,                -- conversation snapshot
    settings_json TEXT,                     -- settings at submission time
    user_id INTEGER,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);
CREATE INDEX IF NOT EXISTS idx_issue_reports_created ON issue_reports(created_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_reports.db");
        let db = ReportDb::open(&db_path).unwrap();

        // Verify tables exist
        let conn = db.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"issue_reports".to_string()));
        assert!(tables.contains(&"rd_schema_version".to_string()));
    }
}
