//! The exchange unit for export, import and reconciliation.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient, Goal};

/// Schema version stamped on every payload this crate produces.
pub const SCHEMA_VERSION: &str = "1.0";

/// Scheduler capacity used when settings do not name one.
pub const DEFAULT_MAX_ACTIVE_GOALS: usize = 3;

/// User settings carried alongside the goals.
///
/// Only `maxActiveGoals` is interpreted; every other key is kept as-is so
/// settings written by other clients survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_max_active_goals", with = "lenient::capacity")]
    pub max_active_goals: usize,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_max_active_goals() -> usize {
    DEFAULT_MAX_ACTIVE_GOALS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_active_goals: DEFAULT_MAX_ACTIVE_GOALS,
            extra: Map::new(),
        }
    }
}

/// A complete, serialisable goal set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePayload {
    #[serde(default, with = "lenient::null_as_default")]
    pub version: String,

    /// When the payload was produced; `None` if missing or unreadable
    #[serde(default, with = "lenient::optional_timestamp")]
    pub export_date: Option<Timestamp>,

    /// Absent or `null` reads as no goals
    #[serde(default, with = "lenient::null_as_default")]
    pub goals: Vec<Goal>,

    #[serde(default, with = "lenient::null_as_default")]
    pub settings: Settings,
}

impl Default for MergePayload {
    /// An empty payload that has never been exported.
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            export_date: None,
            goals: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl MergePayload {
    /// Creates a payload stamped with the current schema version.
    pub fn new(goals: Vec<Goal>, settings: Settings, export_date: Timestamp) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            export_date: Some(export_date),
            goals,
            settings,
        }
    }

    /// Parses a payload from JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises the payload as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
