//! GUI runner - launches the ragdesk window

use anyhow::Result;
use eframe::egui;
use tracing::info;

use crate::config::Config;
use crate::gui::app::RagdeskApp;
use crate::knet::KnetClient;
use crate::report::{IssueReportRepository, ReportDb};

/// Run the main GUI application
pub fn run_gui(config: Config) -> Result<()> {
    let db = ReportDb::open(&config.db_path)?;
    let repository = IssueReportRepository::new(db);
    let client = KnetClient::new(&config.knet_endpoint);

    info!("[ragdesk] Using KNet endpoint {}", config.knet_endpoint);
    info!("[ragdesk] Reports stored in {}", config.db_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 680.0])
            .with_min_inner_size([420.0, 480.0])
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    let app = RagdeskApp::new(client, repository);

    eframe::run_native("ragdesk", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
