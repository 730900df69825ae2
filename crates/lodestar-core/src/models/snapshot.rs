//! Comparable projections of a goal's tracked fields and field-level diffs.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, Goal, GoalStatus};

/// Fields that are audited in a goal's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedField {
    Title,
    Description,
    Motivation,
    Urgency,
    Deadline,
    Status,
    Priority,
}

impl TrackedField {
    /// Every tracked field, in the order changes are reported.
    pub const ALL: [TrackedField; 7] = [
        TrackedField::Title,
        TrackedField::Description,
        TrackedField::Motivation,
        TrackedField::Urgency,
        TrackedField::Deadline,
        TrackedField::Status,
        TrackedField::Priority,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedField::Title => "title",
            TrackedField::Description => "description",
            TrackedField::Motivation => "motivation",
            TrackedField::Urgency => "urgency",
            TrackedField::Deadline => "deadline",
            TrackedField::Status => "status",
            TrackedField::Priority => "priority",
        }
    }
}

/// Flattened view of a goal's tracked fields at one instant.
///
/// Every field is optional: a snapshot read back from a payload may have been
/// written by an older client, and "absent", `null` and "not a number" all
/// collapse to `None` so they compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, with = "lenient::optional_number")]
    pub motivation: Option<i64>,

    #[serde(default, with = "lenient::optional_number")]
    pub urgency: Option<i64>,

    #[serde(default, with = "lenient::optional_timestamp")]
    pub deadline: Option<Timestamp>,

    #[serde(default)]
    pub status: Option<GoalStatus>,

    #[serde(default, with = "lenient::optional_number")]
    pub priority: Option<i64>,
}

impl Snapshot {
    /// Captures a goal together with its priority at capture time.
    pub fn capture(goal: &Goal, priority: i64) -> Self {
        Self {
            title: Some(goal.title.clone()),
            description: Some(goal.description.clone()),
            motivation: Some(i64::from(goal.motivation)),
            urgency: Some(i64::from(goal.urgency)),
            deadline: goal.deadline,
            status: Some(goal.status),
            priority: Some(priority),
        }
    }

    /// JSON value of a single field, `null` when absent.
    pub fn value(&self, field: TrackedField) -> Value {
        match field {
            TrackedField::Title => self.title.clone().map_or(Value::Null, Value::String),
            TrackedField::Description => {
                self.description.clone().map_or(Value::Null, Value::String)
            }
            TrackedField::Motivation => self.motivation.map_or(Value::Null, Value::from),
            TrackedField::Urgency => self.urgency.map_or(Value::Null, Value::from),
            TrackedField::Deadline => self
                .deadline
                .map_or(Value::Null, |ts| Value::String(ts.to_string())),
            TrackedField::Status => self
                .status
                .map_or(Value::Null, |s| Value::String(s.as_str().to_string())),
            TrackedField::Priority => self.priority.map_or(Value::Null, Value::from),
        }
    }
}

/// One field-level change inside a history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    #[serde(default)]
    pub from: Value,
    #[serde(default)]
    pub to: Value,
}

/// Compares two snapshots over the tracked fields and lists what differs.
///
/// An empty result means the mutation was a no-op.
pub fn diff(before: &Snapshot, after: &Snapshot) -> Vec<FieldChange> {
    TrackedField::ALL
        .iter()
        .filter_map(|&field| {
            let from = before.value(field);
            let to = after.value(field);
            (from != to).then(|| FieldChange {
                field: field.as_str().to_string(),
                from,
                to,
            })
        })
        .collect()
}
