//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    models::Goal,
    reconcile::{MergeReport, Side},
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use lodestar_core::{display::CreateResult, models::Goal};
///
/// let goal = Goal::new("Write a novel".to_string(), String::new(), 5, 2, None, Timestamp::now());
/// println!("{}", CreateResult::new(goal));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created goal with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated goal with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted goal '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

/// Summary of a sync merge.
pub struct MergeSummary<'a> {
    pub report: &'a MergeReport,
    pub goal_count: usize,
}

impl fmt::Display for MergeSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "Merged {} goals", self.goal_count)?;
        writeln!(f)?;
        writeln!(f, "- Local changes kept: {}", report.local_wins)?;
        writeln!(f, "- Remote changes taken: {}", report.remote_wins)?;
        writeln!(f, "- Only on this device: {}", report.local_only)?;
        writeln!(f, "- Only on the other device: {}", report.remote_only)?;
        if report.dropped > 0 {
            writeln!(f, "- Deleted on both: {}", report.dropped)?;
        }
        if let Some(side) = report.settings_from {
            let from = match side {
                Side::Local => "this device",
                Side::Remote => "the other device",
            };
            writeln!(f, "- Settings from: {from}")?;
        }
        Ok(())
    }
}
