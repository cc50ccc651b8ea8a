//! Issue report entity and its structured sub-objects

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::{Correctness, IssueTag};

/// What the user said was wrong with the answer.
///
/// This is the part that gets JSON-encoded and forwarded to KNet alongside
/// being persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub correctness: Option<Correctness>,
    pub issues: Vec<IssueTag>,
    pub more_detail: String,
}

/// Snapshot of the conversation the report is about.
///
/// History, state and selections are host-shaped JSON taken verbatim from the
/// session at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatSnapshot {
    pub conv_id: String,
    pub chat_history: Value,
    pub info_panel: String,
    pub chat_state: Value,
    /// Resolved per-index selections, index id -> value or list of values
    pub selecteds: BTreeMap<String, Value>,
}

/// A persisted user critique of a chat answer.
///
/// Created and stored once on submit; never updated or deleted by this code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    /// Row id, set by the store on append
    pub id: Option<i64>,
    pub issues: IssueSummary,
    pub chat: ChatSnapshot,
    /// The user's settings map at submission time
    pub settings: Value,
    pub user: Option<i64>,
    /// Epoch milliseconds
    pub created_at: i64,
}
