//! GUI module for the ragdesk application
//!
//! The chat page hosts two side panels: retrieval settings (pipeline choice
//! and expansion toggle) and answer feedback (issue reporting). Each panel
//! owns its widget state and handles its own events; the app shell owns the
//! session state both draw from.

pub mod app;
pub mod feedback;
pub mod rag_settings;
pub mod runner;

pub use app::RagdeskApp;
pub use feedback::FeedbackPanel;
pub use rag_settings::RagSettingsPanel;
pub use runner::run_gui;
