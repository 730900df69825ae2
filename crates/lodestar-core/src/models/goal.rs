//! Goal model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{lenient, GoalStatus, History};

/// A tracked goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Opaque unique identifier, fixed at creation
    pub id: String,

    /// Title of the goal (never empty for goals created through the store)
    #[serde(default, with = "lenient::null_as_default")]
    pub title: String,

    /// Free-form description
    #[serde(default, with = "lenient::null_as_default")]
    pub description: String,

    /// How much the user wants this, 1 to 5
    #[serde(default = "lenient::default_rating", with = "lenient::rating")]
    pub motivation: u8,

    /// How pressing it is, 1 to 5
    #[serde(default = "lenient::default_rating", with = "lenient::rating")]
    pub urgency: u8,

    /// Optional due date
    #[serde(default, with = "lenient::optional_timestamp")]
    pub deadline: Option<Timestamp>,

    #[serde(default, with = "lenient::null_as_default")]
    pub status: GoalStatus,

    /// Timestamp when the goal was created (UTC)
    #[serde(default = "lenient::epoch", with = "lenient::timestamp")]
    pub created_at: Timestamp,

    /// Timestamp of the last mutation (UTC)
    #[serde(default = "lenient::epoch", with = "lenient::timestamp")]
    pub last_updated: Timestamp,

    /// Append-only log of check-ins
    #[serde(default, with = "lenient::timestamp_list")]
    pub check_in_dates: Vec<Timestamp>,

    /// Audit trail, oldest first
    #[serde(default, with = "lenient::null_as_default")]
    pub history: History,
}

impl Goal {
    /// Builds a fresh, not yet scheduled goal. Validation is the caller's job.
    pub fn new(
        title: String,
        description: String,
        motivation: u8,
        urgency: u8,
        deadline: Option<Timestamp>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description,
            motivation,
            urgency,
            deadline,
            status: GoalStatus::Paused,
            created_at: now,
            last_updated: now,
            check_in_dates: Vec::new(),
            history: History::default(),
        }
    }

    /// Whether the goal is in a state the scheduler must leave alone.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
