//! Session-scoped domain types for the chat page
//!
//! Everything here lives only as long as the current chat session: the
//! retrieval settings snapshot, the per-index selection wiring, and the
//! session state the feedback panel folds into a persisted report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// User judgment of an answer's correctness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correctness {
    Correct,
    Incorrect,
}

impl Correctness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Correctness::Correct => "correct",
            Correctness::Incorrect => "incorrect",
        }
    }
}

/// Issue tags a user can attach to an answer besides the correctness verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueTag {
    Offensive,
    WrongEvidence,
}

impl IssueTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueTag::Offensive => "offensive",
            IssueTag::WrongEvidence => "wrong-evidence",
        }
    }
}

/// Current retrieval settings, recomputed on every change event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// Selected pipeline name; `None` lets the service pick one per query
    pub pipeline: Option<String>,

    /// Search more broadly during retrieval before answering
    pub retrieval_expansion: bool,
}

/// Which positional selection slots belong to a registered index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorSpec {
    /// The index reads one slot
    Single(usize),
    /// The index reads several slots, kept in declaration order
    Multiple(Vec<usize>),
}

/// An index registered by the host, as the feedback panel sees it
#[derive(Debug, Clone)]
pub struct RegisteredIndex {
    pub id: String,
    /// `None` means the index contributes no selection state
    pub selector: Option<SelectorSpec>,
}

/// Map the positional selection slots onto the indices that declared them.
///
/// An index whose selector points at a slot that does not exist is logged and
/// skipped; the remaining indices are unaffected.
pub fn resolve_selections(
    indices: &[RegisteredIndex],
    slots: &[Value],
) -> BTreeMap<String, Value> {
    let mut selecteds = BTreeMap::new();

    for index in indices {
        let Some(selector) = &index.selector else {
            continue;
        };

        match selector {
            SelectorSpec::Single(slot) => match slots.get(*slot) {
                Some(value) => {
                    selecteds.insert(index.id.clone(), value.clone());
                }
                None => warn!(
                    "Selection slot {} out of range for index '{}', skipping",
                    slot, index.id
                ),
            },
            SelectorSpec::Multiple(wanted) => {
                let values: Option<Vec<Value>> =
                    wanted.iter().map(|slot| slots.get(*slot).cloned()).collect();
                match values {
                    Some(values) => {
                        selecteds.insert(index.id.clone(), Value::Array(values));
                    }
                    None => warn!(
                        "Selection slots {:?} out of range for index '{}', skipping",
                        wanted, index.id
                    ),
                }
            }
        }
    }

    selecteds
}

/// Per-session chat state owned by the app shell.
///
/// The chat transcript, state blob and selection slots are host-shaped JSON;
/// the panels never look inside them, they only snapshot them into reports.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub conv_id: String,
    pub chat_history: Value,
    pub info_panel: String,
    pub chat_state: Value,
    /// Broader settings map the host maintains; includes the retrieval snapshot
    pub settings: Value,
    pub user_id: Option<i64>,
    pub indices: Vec<RegisteredIndex>,
    pub selections: Vec<Value>,
}

impl ChatSession {
    /// Start a fresh session with a new conversation id and one file index
    pub fn new() -> Self {
        Self {
            conv_id: Uuid::new_v4().to_string(),
            chat_history: Value::Array(Vec::new()),
            info_panel: String::new(),
            chat_state: Value::Object(serde_json::Map::new()),
            settings: Value::Object(serde_json::Map::new()),
            user_id: None,
            indices: vec![RegisteredIndex {
                id: "file".to_string(),
                selector: Some(SelectorSpec::Single(0)),
            }],
            selections: vec![Value::Null],
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index(id: &str, selector: Option<SelectorSpec>) -> RegisteredIndex {
        RegisteredIndex {
            id: id.to_string(),
            selector,
        }
    }

    #[test]
    fn single_and_multiple_selectors_resolve() {
        let indices = vec![
            index("file", Some(SelectorSpec::Single(0))),
            index("graph", Some(SelectorSpec::Multiple(vec![1, 2]))),
            index("web", None),
        ];
        let slots = vec![json!("doc-1"), json!(["a"]), json!(42)];

        let selecteds = resolve_selections(&indices, &slots);

        assert_eq!(selecteds.len(), 2);
        assert_eq!(selecteds["file"], json!("doc-1"));
        assert_eq!(selecteds["graph"], json!([["a"], 42]));
        assert!(!selecteds.contains_key("web"));
    }

    #[test]
    fn out_of_range_slot_skips_only_that_index() {
        let indices = vec![
            index("file", Some(SelectorSpec::Single(5))),
            index("graph", Some(SelectorSpec::Single(0))),
            index("notes", Some(SelectorSpec::Multiple(vec![0, 9]))),
        ];
        let slots = vec![json!("doc-1")];

        let selecteds = resolve_selections(&indices, &slots);

        assert_eq!(selecteds.len(), 1);
        assert_eq!(selecteds["graph"], json!("doc-1"));
    }

    #[test]
    fn issue_tags_serialize_in_wire_form() {
        assert_eq!(
            serde_json::to_value([IssueTag::Offensive, IssueTag::WrongEvidence]).unwrap(),
            json!(["offensive", "wrong-evidence"])
        );
        assert_eq!(
            serde_json::to_value(Correctness::Incorrect).unwrap(),
            json!("incorrect")
        );
    }

    #[test]
    fn fresh_sessions_get_distinct_conversation_ids() {
        assert_ne!(ChatSession::new().conv_id, ChatSession::new().conv_id);
    }
}
