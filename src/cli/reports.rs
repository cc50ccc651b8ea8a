//! Reports command implementation

use anyhow::Result;

use ragdesk::config::Config;
use ragdesk::report::{IssueReportRepository, ReportDb};

/// Print the most recently submitted issue reports
pub fn reports_command(config: &Config, limit: usize) -> Result<()> {
    let db = ReportDb::open(&config.db_path)?;
    let repository = IssueReportRepository::new(db);

    let reports = repository.list_recent(limit)?;
    if reports.is_empty() {
        println!("No issue reports found.");
        return Ok(());
    }

    println!("Issue reports ({}):\n", reports.len());

    for report in reports {
        let when = chrono::DateTime::from_timestamp_millis(report.created_at)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        let correctness = report
            .issues
            .correctness
            .map(|c| c.as_str())
            .unwrap_or("-");
        let tags: Vec<&str> = report.issues.issues.iter().map(|t| t.as_str()).collect();

        println!(
            "  #{} [{}] conv {} correctness={} issues=[{}] {}",
            report.id.unwrap_or(0),
            when,
            report.chat.conv_id,
            correctness,
            tags.join(", "),
            report.issues.more_detail
        );
    }

    Ok(())
}
