//! Main application shell
//!
//! Owns the per-session chat state and mounts the two chat-page panels. The
//! chat transcript itself is rendered by the host product; this shell carries
//! the session plumbing the panels need.

use eframe::egui::{self, Color32, RichText};

use crate::knet::KnetClient;
use crate::report::IssueReportRepository;
use crate::session::ChatSession;

use super::feedback::FeedbackPanel;
use super::rag_settings::RagSettingsPanel;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

/// Window background
pub(super) const BG_PRIMARY: Color32 = Color32::from_rgb(22, 24, 28);
/// Section background for panels
pub(super) const BG_SECONDARY: Color32 = Color32::from_rgb(30, 33, 39);
/// Primary text
pub(super) const TEXT_PRIMARY: Color32 = Color32::from_rgb(222, 226, 230);
/// Muted labels
pub(super) const TEXT_MUTED: Color32 = Color32::from_rgb(124, 131, 142);
/// Success status
pub(super) const ACCENT_GREEN: Color32 = Color32::from_rgb(94, 175, 98);
/// Error status
pub(super) const ACCENT_RED: Color32 = Color32::from_rgb(214, 92, 92);

/// The ragdesk application shell
pub struct RagdeskApp {
    session: ChatSession,
    settings_panel: RagSettingsPanel,
    feedback_panel: FeedbackPanel,
    repository: IssueReportRepository,
}

impl RagdeskApp {
    /// Build the shell and both panels. The settings panel fetches the
    /// pipeline listing here, once.
    pub fn new(client: KnetClient, repository: IssueReportRepository) -> Self {
        let settings_panel = RagSettingsPanel::new(&client);
        let feedback_panel = FeedbackPanel::new(client);

        Self {
            session: ChatSession::new(),
            settings_panel,
            feedback_panel,
            repository,
        }
    }
}

impl eframe::App for RagdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BG_PRIMARY).inner_margin(16.0))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("RAGDESK")
                        .monospace()
                        .size(18.0)
                        .color(TEXT_PRIMARY),
                );
                ui.label(
                    RichText::new(format!("Conversation {}", self.session.conv_id))
                        .small()
                        .color(TEXT_MUTED),
                );
                ui.add_space(12.0);

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        egui::Frame::none()
                            .fill(BG_SECONDARY)
                            .corner_radius(4.0)
                            .inner_margin(12.0)
                            .show(ui, |ui| {
                                if self.settings_panel.render(ui) {
                                    // Fold the fresh snapshot into the session's settings map
                                    if let Ok(value) =
                                        serde_json::to_value(self.settings_panel.snapshot())
                                    {
                                        self.session.settings = value;
                                    }
                                }
                            });

                        ui.add_space(8.0);

                        egui::Frame::none()
                            .fill(BG_SECONDARY)
                            .corner_radius(4.0)
                            .inner_margin(12.0)
                            .show(ui, |ui| {
                                self.feedback_panel
                                    .render(ui, &self.repository, &self.session);
                            });
                    });
            });
    }
}
