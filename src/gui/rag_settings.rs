//! Retrieval settings panel
//!
//! Lets the user pick a KNet pipeline and toggle retrieval expansion. The
//! pipeline listing is fetched once when the panel is built and cached for
//! the panel's lifetime; a failed listing leaves the dropdown empty instead
//! of failing construction.

use eframe::egui::{self, RichText};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::gui::app::TEXT_MUTED;
use crate::knet::{KnetClient, PipelineCatalog};
use crate::session::SettingsSnapshot;

/// Settings panel for the chat page
pub struct RagSettingsPanel {
    catalog: PipelineCatalog,
    /// Outer `None`: nothing picked yet. Inner `None`: the automatic entry.
    selected: Option<Option<String>>,
    retrieval_expansion: bool,
    snapshot: SettingsSnapshot,
    description: String,
    commonmark_cache: CommonMarkCache,
}

impl RagSettingsPanel {
    /// Build the panel, fetching the pipeline listing once
    pub fn new(client: &KnetClient) -> Self {
        Self::from_catalog(client.fetch_pipelines())
    }

    /// Build the panel from an already-fetched catalog
    pub fn from_catalog(catalog: PipelineCatalog) -> Self {
        Self {
            catalog,
            selected: None,
            retrieval_expansion: false,
            snapshot: SettingsSnapshot::default(),
            description: String::new(),
            commonmark_cache: CommonMarkCache::default(),
        }
    }

    /// The settings snapshot computed by the last change event
    pub fn snapshot(&self) -> &SettingsSnapshot {
        &self.snapshot
    }

    /// Recompute the snapshot and description text from the widget values.
    ///
    /// Pure: the same inputs always yield the same pair. The description is
    /// empty for identifiers the listing does not contain.
    pub fn on_change(
        &self,
        pipeline: Option<&str>,
        retrieval_expansion: bool,
    ) -> (SettingsSnapshot, String) {
        let snapshot = SettingsSnapshot {
            pipeline: pipeline.map(str::to_string),
            retrieval_expansion,
        };
        let description = self.catalog.description_for(pipeline).to_string();
        (snapshot, description)
    }

    /// Render the panel; returns true when a change event fired this frame
    pub fn render(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label(RichText::new("Pipeline:").color(TEXT_MUTED));

            let selected_label = match &self.selected {
                Some(choice) => self
                    .catalog
                    .options()
                    .iter()
                    .find(|option| option.name == *choice)
                    .map(|option| option.label().to_string())
                    .unwrap_or_default(),
                None => String::new(),
            };

            let options = self.catalog.options().to_vec();
            egui::ComboBox::from_id_salt("pipeline_select")
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    for option in &options {
                        let response = ui.selectable_value(
                            &mut self.selected,
                            Some(option.name.clone()),
                            option.label(),
                        );
                        changed |= response.changed();
                    }
                });
        });

        if self.catalog.is_empty() {
            ui.label(
                RichText::new("(no pipelines available)")
                    .small()
                    .color(TEXT_MUTED),
            );
        }

        if !self.description.is_empty() {
            ui.add_space(4.0);
            CommonMarkViewer::new().show(ui, &mut self.commonmark_cache, &self.description);
        }

        ui.add_space(8.0);
        changed |= ui
            .checkbox(&mut self.retrieval_expansion, "Enable retrieval expansion")
            .changed();

        if changed {
            let pipeline = self.selected.clone().flatten();
            let (snapshot, description) =
                self.on_change(pipeline.as_deref(), self.retrieval_expansion);
            self.snapshot = snapshot;
            self.description = description;
        }

        changed
    }
}
