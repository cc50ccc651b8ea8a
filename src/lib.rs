//! ragdesk - Desktop chat companion for a KNet retrieval service
//!
//! ragdesk renders the side panels of a retrieval-augmented chat page:
//!
//! 1. **Retrieval settings**: picks which KNet pipeline answers queries
//!    (or lets the service choose per query) and toggles retrieval
//!    expansion. The pipeline listing comes from the service at startup.
//!
//! 2. **Answer feedback**: collects a correctness verdict, issue tags and
//!    free text, persists the report with a snapshot of the session locally,
//!    and forwards a summary to the service for investigation.

pub mod config;
pub mod gui;
pub mod knet;
pub mod report;
pub mod session;
