//! Three-way reconciliation of goal payloads edited on separate devices.
//!
//! # Merge Semantics
//!
//! Each goal id found in `local` or `remote` is resolved on its own:
//!
//! 1. **One-sided**: present on only one side, that copy is kept. This covers
//!    creation on one device as well as deletion on one device while the
//!    other still has the goal.
//! 2. **One side changed**: if exactly one side equals the base copy, the
//!    other (changed) side wins.
//! 3. **Both changed / no base**: the later `lastUpdated` wins, then the later
//!    `createdAt`; a complete tie keeps local.
//!
//! Whichever side wins, the histories of both sides are unioned by entry id,
//! sorted by timestamp and trimmed to the newest [`MAX_MERGED_HISTORY`]
//! entries, so the audit trail shows both branches of edits.
//!
//! Goals that exist only in the base were deleted on both sides and stay
//! deleted. Settings follow the payload with the later export date.
//!
//! Equality against the base is structural on the typed [`Goal`], so two
//! serialisations that differ only in key order compare equal.
//!
//! Merging never fails: missing lists are empty and unreadable timestamps
//! were already normalised to "oldest" when the payloads were parsed.

use std::collections::{HashMap, HashSet};

use jiff::Timestamp;
use log::debug;

use crate::models::{Goal, History, HistoryEntry, MergePayload, Settings};

/// Maximum number of history entries kept on a merged goal.
pub const MAX_MERGED_HISTORY: usize = 100;

/// Which input a merged value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Local,
    Remote,
}

/// Counters describing how a merge resolved its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Goals on both sides where the local copy won
    pub local_wins: usize,
    /// Goals on both sides where the remote copy won
    pub remote_wins: usize,
    /// Goals that only exist locally
    pub local_only: usize,
    /// Goals that only exist remotely
    pub remote_only: usize,
    /// Base goals deleted on both sides
    pub dropped: usize,
    /// Which side supplied the settings
    pub settings_from: Option<Side>,
}

/// A merged payload together with its report.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub payload: MergePayload,
    pub report: MergeReport,
}

/// Merges `local` and `remote` against their common ancestor `base`.
pub fn merge(
    base: Option<&MergePayload>,
    local: &MergePayload,
    remote: &MergePayload,
    now: Timestamp,
) -> MergePayload {
    merge_with_report(base, local, remote, now).payload
}

/// Two-way merge, for when no common ancestor is known.
pub fn merge_two(local: &MergePayload, remote: &MergePayload, now: Timestamp) -> MergePayload {
    merge(None, local, remote, now)
}

/// Same as [`merge`], also reporting how each goal was resolved.
pub fn merge_with_report(
    base: Option<&MergePayload>,
    local: &MergePayload,
    remote: &MergePayload,
    now: Timestamp,
) -> MergeOutcome {
    let base_goals: HashMap<&str, &Goal> = base
        .map(|payload| index(&payload.goals))
        .unwrap_or_default();
    let local_goals = index(&local.goals);
    let remote_goals = index(&remote.goals);
    let mut report = MergeReport::default();

    // Local order first, then goals only the remote knows about
    let mut seen = HashSet::new();
    let ids: Vec<&str> = local
        .goals
        .iter()
        .chain(remote.goals.iter())
        .map(|goal| goal.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect();

    let goals: Vec<Goal> = ids
        .into_iter()
        .filter_map(|id| match (local_goals.get(id), remote_goals.get(id)) {
            (Some(&local_goal), Some(&remote_goal)) => {
                let base_goal = base_goals.get(id).copied();
                let winner = match pick_side(base_goal, local_goal, remote_goal) {
                    Side::Local => {
                        report.local_wins += 1;
                        local_goal
                    }
                    Side::Remote => {
                        report.remote_wins += 1;
                        remote_goal
                    }
                };
                let mut merged = winner.clone();
                merged.history = merge_histories(&local_goal.history, &remote_goal.history);
                Some(merged)
            }
            (Some(&goal), None) => {
                report.local_only += 1;
                Some(goal.clone())
            }
            (None, Some(&goal)) => {
                report.remote_only += 1;
                Some(goal.clone())
            }
            (None, None) => None,
        })
        .collect();

    report.dropped = base_goals
        .keys()
        .filter(|id| !local_goals.contains_key(*id) && !remote_goals.contains_key(*id))
        .count();

    let (settings, side) = pick_settings(local, remote);
    report.settings_from = Some(side);

    debug!("Merged payloads: {report:?}");
    MergeOutcome {
        payload: MergePayload::new(goals, settings, now),
        report,
    }
}

fn index(goals: &[Goal]) -> HashMap<&str, &Goal> {
    let mut map = HashMap::with_capacity(goals.len());
    for goal in goals {
        // First occurrence wins if a payload repeats an id
        map.entry(goal.id.as_str()).or_insert(goal);
    }
    map
}

/// Decides which copy of a goal present on both sides wins.
pub fn pick_side(base: Option<&Goal>, local: &Goal, remote: &Goal) -> Side {
    if let Some(base) = base {
        match (local != base, remote != base) {
            (true, false) => return Side::Local,
            (false, true) => return Side::Remote,
            _ => {}
        }
    }

    let remote_is_newer = remote
        .last_updated
        .cmp(&local.last_updated)
        .then_with(|| remote.created_at.cmp(&local.created_at))
        .is_gt();
    if remote_is_newer {
        Side::Remote
    } else {
        Side::Local
    }
}

/// Unions two histories by entry id (local entries first), sorts them by
/// timestamp and keeps the newest [`MAX_MERGED_HISTORY`].
pub fn merge_histories(local: &History, remote: &History) -> History {
    let mut seen = HashSet::new();
    let mut entries: Vec<HistoryEntry> = local
        .iter()
        .chain(remote.iter())
        .filter(|entry| seen.insert(entry.id.as_str()))
        .cloned()
        .collect();

    entries.sort_by_key(|entry| entry.timestamp);
    let excess = entries.len().saturating_sub(MAX_MERGED_HISTORY);
    entries.drain(..excess);
    History::from(entries)
}

/// Settings of the payload exported last; local wins ties and unknown dates.
fn pick_settings(local: &MergePayload, remote: &MergePayload) -> (Settings, Side) {
    let remote_is_newer = match (local.export_date, remote.export_date) {
        (Some(local_date), Some(remote_date)) => remote_date > local_date,
        (None, Some(_)) => true,
        (_, None) => false,
    };
    if remote_is_newer {
        (remote.settings.clone(), Side::Remote)
    } else {
        (local.settings.clone(), Side::Local)
    }
}
