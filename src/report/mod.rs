//! Local persistence for user issue reports

mod db;
mod models;
mod repository;

pub use db::ReportDb;
pub use models::{ChatSnapshot, IssueReport, IssueSummary};
pub use repository::{IssueReportRepository, StorageError};
