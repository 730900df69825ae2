//! Data models for goals, their audit history and exchanged payloads.
//!
//! All models serialise to the JSON shapes other clients read and write:
//! camelCase keys, lowercase statuses, kebab-case history events and RFC 3339
//! timestamps. Deserialisation is deliberately forgiving (see [`lenient`]) so
//! that a payload from an older or buggy client still loads.
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use lodestar_core::models::{GoalStatus, MergePayload};
//!
//! let payload = MergePayload::from_json(
//!     r#"{
//!         "version": "1.0",
//!         "exportDate": "2026-01-05T10:00:00Z",
//!         "goals": [{
//!             "id": "g1",
//!             "title": "Learn Rust",
//!             "motivation": 5,
//!             "urgency": "3",
//!             "deadline": "2026-02-01",
//!             "status": "active",
//!             "createdAt": "2026-01-01T09:00:00Z",
//!             "lastUpdated": "not a date"
//!         }],
//!         "settings": {"maxActiveGoals": 2, "theme": "dark"}
//!     }"#,
//! )
//! .unwrap();
//!
//! let goal = &payload.goals[0];
//! assert_eq!(goal.urgency, 3);
//! assert_eq!(goal.status, GoalStatus::Active);
//! assert_eq!(goal.last_updated, jiff::Timestamp::UNIX_EPOCH);
//! assert_eq!(payload.settings.max_active_goals, 2);
//! assert!(payload.settings.extra.contains_key("theme"));
//! ```

pub mod goal;
pub mod history;
pub mod lenient;
pub mod payload;
pub mod snapshot;
pub mod status;

#[cfg(test)]
mod tests;

pub use goal::Goal;
pub use history::{History, HistoryEntry};
pub use payload::{MergePayload, Settings, DEFAULT_MAX_ACTIVE_GOALS, SCHEMA_VERSION};
pub use snapshot::{diff, FieldChange, Snapshot, TrackedField};
pub use status::{GoalStatus, HistoryEvent};

/// Lowest motivation/urgency rating.
pub const RATING_MIN: u8 = 1;

/// Highest motivation/urgency rating.
pub const RATING_MAX: u8 = 5;
