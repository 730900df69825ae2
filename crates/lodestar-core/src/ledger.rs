//! Per-goal audit ledger: recording changes and rolling back to them.
//!
//! The ledger only ever grows. Entries are appended when a mutation actually
//! changed a tracked field, the oldest ones fall off once a goal holds
//! [`MAX_HISTORY`] entries, and a rollback is itself a new entry rather than
//! a rewrite of the log.

use jiff::Timestamp;
use log::debug;
use serde_json::{json, Value};

use crate::{
    models::{lenient, FieldChange, Goal, HistoryEntry, HistoryEvent, Snapshot},
    priority,
};

/// Maximum number of entries kept per goal.
pub const MAX_HISTORY: usize = 50;

pub use crate::models::diff;

/// Snapshot of a goal's tracked fields, with priority evaluated at `now`.
pub fn snapshot(goal: &Goal, now: Timestamp) -> Snapshot {
    Snapshot::capture(goal, priority::priority(goal, now))
}

/// Appends an entry to the goal's history unless `changes` is empty.
///
/// Returns the new entry, or `None` for a no-op.
pub fn record(
    goal: &mut Goal,
    event: HistoryEvent,
    before: Option<Snapshot>,
    after: Option<Snapshot>,
    changes: Vec<FieldChange>,
    meta: Option<Value>,
    now: Timestamp,
) -> Option<&HistoryEntry> {
    if changes.is_empty() {
        debug!("Skipping empty {} entry for goal {}", event.as_str(), goal.id);
        return None;
    }

    let entry = HistoryEntry {
        id: uuid::Uuid::new_v4().to_string(),
        event,
        timestamp: now,
        changes,
        before,
        after,
        meta,
    };
    debug!(
        "Recording {} entry {} for goal {}",
        event.as_str(),
        entry.id,
        goal.id
    );
    goal.history.push_bounded(entry, MAX_HISTORY);
    goal.history.last()
}

/// Restores the tracked fields stored in the `before` snapshot of entry
/// `entry_id` and records a rollback entry.
///
/// Returns `None`, leaving the goal untouched, when the entry does not exist
/// or has no `before` snapshot to restore.
pub fn revert<'a>(goal: &'a mut Goal, entry_id: &str, now: Timestamp) -> Option<&'a Goal> {
    let target = goal.history.find(entry_id)?.before.clone()?;

    let before = snapshot(goal, now);
    apply(goal, &target);
    goal.last_updated = now;
    let after = snapshot(goal, now);

    let changes = diff(&before, &after);
    record(
        goal,
        HistoryEvent::Rollback,
        Some(before),
        Some(after),
        changes,
        Some(json!({ "revertedTo": entry_id })),
        now,
    );
    Some(&*goal)
}

fn apply(goal: &mut Goal, target: &Snapshot) {
    if let Some(title) = target.title.as_ref().filter(|t| !t.trim().is_empty()) {
        goal.title.clone_from(title);
    }
    if let Some(description) = &target.description {
        goal.description.clone_from(description);
    }
    if let Some(motivation) = target.motivation {
        goal.motivation = lenient::clamp_rating(motivation);
    }
    if let Some(urgency) = target.urgency {
        goal.urgency = lenient::clamp_rating(urgency);
    }
    goal.deadline = target.deadline;
    if let Some(status) = target.status {
        goal.status = status;
    }
}
