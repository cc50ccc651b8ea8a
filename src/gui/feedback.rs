//! Answer feedback panel
//!
//! Collects a correctness verdict, issue tags and free text, persists the
//! full report locally and best-effort forwards a summary of it to KNet.

use eframe::egui::{self, RichText};
use tracing::warn;

use crate::gui::app::{ACCENT_GREEN, ACCENT_RED, TEXT_MUTED};
use crate::knet::KnetClient;
use crate::report::{ChatSnapshot, IssueReport, IssueReportRepository, IssueSummary};
use crate::session::{self, ChatSession, Correctness, IssueTag};

/// Acknowledgment shown after a successful submission
const THANK_YOU: &str = "Thank you for your feedback";

/// Feedback panel for the chat page
pub struct FeedbackPanel {
    client: KnetClient,
    pub correctness: Option<Correctness>,
    pub offensive: bool,
    pub wrong_evidence: bool,
    pub more_detail: String,
    /// Status line under the form: (message, is_error)
    status: Option<(String, bool)>,
}

impl FeedbackPanel {
    /// Build the panel. No network traffic happens here; the client (which
    /// resolves the feedback endpoint) is only used on submit.
    pub fn new(client: KnetClient) -> Self {
        Self {
            client,
            correctness: None,
            offensive: false,
            wrong_evidence: false,
            more_detail: String::new(),
            status: None,
        }
    }

    pub fn status(&self) -> Option<&(String, bool)> {
        self.status.as_ref()
    }

    fn issue_tags(&self) -> Vec<IssueTag> {
        let mut tags = Vec::new();
        if self.offensive {
            tags.push(IssueTag::Offensive);
        }
        if self.wrong_evidence {
            tags.push(IssueTag::WrongEvidence);
        }
        tags
    }

    /// Persist the report, then forward its summary to KNet.
    ///
    /// The local write must fully succeed; if it fails, the error lands in
    /// the status line and nothing is forwarded. Forwarding failures are
    /// logged only and never undo the stored report.
    pub fn submit(&mut self, repository: &IssueReportRepository, session: &ChatSession) {
        let selecteds = session::resolve_selections(&session.indices, &session.selections);

        let report = IssueReport {
            id: None,
            issues: IssueSummary {
                correctness: self.correctness,
                issues: self.issue_tags(),
                more_detail: self.more_detail.clone(),
            },
            chat: ChatSnapshot {
                conv_id: session.conv_id.clone(),
                chat_history: session.chat_history.clone(),
                info_panel: session.info_panel.clone(),
                chat_state: session.chat_state.clone(),
                selecteds,
            },
            settings: session.settings.clone(),
            user: session.user_id,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        if let Err(e) = repository.append(&report) {
            self.status = Some((format!("Failed to save report: {}", e), true));
            return;
        }

        // Forwarding is advisory; the stored report stands either way.
        match serde_json::to_string(&report.issues) {
            Ok(feedback) => {
                if let Err(e) = self.client.send_feedback(&feedback, &session.conv_id) {
                    warn!("Failed to forward feedback to KNet: {:#}", e);
                }
            }
            Err(e) => warn!("Failed to encode feedback summary: {}", e),
        }

        self.status = Some((THANK_YOU.to_string(), false));
    }

    /// Render the collapsible feedback form
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        repository: &IssueReportRepository,
        session: &ChatSession,
    ) {
        ui.collapsing("Feedback", |ui| {
            ui.label(RichText::new("Correctness:").color(TEXT_MUTED));
            ui.radio_value(
                &mut self.correctness,
                Some(Correctness::Correct),
                "The answer is correct",
            );
            ui.radio_value(
                &mut self.correctness,
                Some(Correctness::Incorrect),
                "The answer is incorrect",
            );

            ui.add_space(8.0);
            ui.label(RichText::new("Other issue:").color(TEXT_MUTED));
            ui.checkbox(&mut self.offensive, "The answer is offensive");
            ui.checkbox(&mut self.wrong_evidence, "The evidence is incorrect");

            ui.add_space(8.0);
            ui.add(
                egui::TextEdit::multiline(&mut self.more_detail)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text(
                        "More detail (e.g. how wrong is it, what is the correct answer, etc...)",
                    ),
            );

            ui.label(
                RichText::new(
                    "This will send the current chat and the user settings to help with investigation",
                )
                .small()
                .color(TEXT_MUTED),
            );

            ui.add_space(8.0);
            if ui.button("Report").clicked() {
                self.submit(repository, session);
            }

            if let Some((message, is_error)) = &self.status {
                let color = if *is_error { ACCENT_RED } else { ACCENT_GREEN };
                ui.label(RichText::new(message).color(color));
            }
        });
    }
}
