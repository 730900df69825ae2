//! Audit history entries and the bounded per-goal log that holds them.

use std::collections::VecDeque;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, FieldChange, HistoryEvent, Snapshot};

/// One immutable audit record attached to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Identifier, unique within the owning goal
    pub id: String,

    pub event: HistoryEvent,

    #[serde(default = "lenient::epoch", with = "lenient::timestamp")]
    pub timestamp: Timestamp,

    #[serde(default, with = "lenient::null_as_default")]
    pub changes: Vec<FieldChange>,

    /// Tracked fields before the mutation; `None` for creations
    #[serde(default)]
    pub before: Option<Snapshot>,

    #[serde(default)]
    pub after: Option<Snapshot>,

    /// Free-form metadata, e.g. `{"revertedTo": "<entry id>"}` on rollbacks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl HistoryEntry {
    /// Id of the entry a rollback restored, if this is a rollback.
    pub fn reverted_to(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.get("revertedTo"))
            .and_then(Value::as_str)
    }
}

/// Ordered audit log of a goal, oldest first.
///
/// Appends go through [`History::push_bounded`], which drops entries from the
/// front once the log grows past its cap. Serialises as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(VecDeque<HistoryEntry>);

impl History {
    /// Appends an entry, then trims the oldest entries until `len <= cap`.
    pub fn push_bounded(&mut self, entry: HistoryEntry, cap: usize) {
        self.0.push_back(entry);
        while self.0.len() > cap {
            self.0.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.0.iter()
    }

    /// Finds an entry by id.
    pub fn find(&self, id: &str) -> Option<&HistoryEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }

    /// Newest entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.back()
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self(entries.into())
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
