//! Status and event enumerations for goals and their history.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of goal statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Selected by the scheduler to be worked on
    Active,

    /// Waiting for a free slot; also the state of a goal that has not been
    /// scheduled yet
    #[default]
    Paused,

    /// Finished by the user
    Completed,

    /// Given up by the user
    Abandoned,
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "paused" => Ok(GoalStatus::Paused),
            "completed" | "done" => Ok(GoalStatus::Completed),
            "abandoned" => Ok(GoalStatus::Abandoned),
            _ => Err(format!("Invalid goal status: {s}")),
        }
    }
}

impl GoalStatus {
    /// String representation used in payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
            GoalStatus::Abandoned => "abandoned",
        }
    }

    /// Terminal states are only ever entered by a human action and are
    /// ignored by the scheduler.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GoalStatus::Completed | GoalStatus::Abandoned)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use lodestar_core::models::GoalStatus;
    ///
    /// assert_eq!(GoalStatus::Active.with_icon(), "➤ Active");
    /// assert_eq!(GoalStatus::Completed.with_icon(), "✓ Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            GoalStatus::Active => "➤ Active",
            GoalStatus::Paused => "○ Paused",
            GoalStatus::Completed => "✓ Completed",
            GoalStatus::Abandoned => "✗ Abandoned",
        }
    }
}

/// Kind of mutation a history entry documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryEvent {
    Created,
    Updated,
    StatusChange,
    Rollback,
}

impl HistoryEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryEvent::Created => "created",
            HistoryEvent::Updated => "updated",
            HistoryEvent::StatusChange => "status-change",
            HistoryEvent::Rollback => "rollback",
        }
    }
}
