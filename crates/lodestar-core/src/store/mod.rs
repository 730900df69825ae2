//! Goal lifecycle orchestration over an owned goal collection.
//!
//! [`GoalStore`] is the only place goals are mutated. Every operation runs
//! the same pipeline:
//!
//! ```text
//! snapshot before ──▶ mutate ──▶ snapshot after ──▶ diff ──▶ ledger::record
//!                                                              │
//!                                   reschedule (if needed) ◀───┘
//! ```
//!
//! Rescheduling asks [`priority::auto_activate`] for the new active set and
//! moves each goal whose status differs through the audited status-change
//! path, one entry per transition.
//!
//! Unknown goal ids are reported as `None`; only invalid input is an error.
//!
//! ```rust
//! use jiff::Timestamp;
//! use lodestar_core::{models::GoalStatus, params::CreateGoal, GoalStore};
//!
//! # fn main() -> lodestar_core::Result<()> {
//! let now = Timestamp::now();
//! let mut store = GoalStore::default();
//! let goal = store.create(
//!     &CreateGoal {
//!         title: "Write a novel".to_string(),
//!         description: None,
//!         motivation: 5,
//!         urgency: 2,
//!         deadline: None,
//!     },
//!     now,
//! )?;
//! assert_eq!(goal.status, GoalStatus::Active);
//! assert_eq!(goal.history.len(), 2); // created + status-change
//! # Ok(())
//! # }
//! ```

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    error::{Result, TrackerError},
    ledger,
    models::{
        FieldChange, Goal, GoalStatus, HistoryEvent, MergePayload, Settings, Snapshot,
        TrackedField,
    },
    params::{CreateGoal, UpdateGoal},
    priority::{self, Activation},
};


/// Owned goal collection plus the settings that drive scheduling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalStore {
    goals: Vec<Goal>,
    settings: Settings,
}

impl GoalStore {
    /// Creates an empty store.
    pub fn new(settings: Settings) -> Self {
        Self {
            goals: Vec::new(),
            settings,
        }
    }

    /// Wraps a payload as-is, without scheduling.
    pub fn from_payload(payload: MergePayload) -> Self {
        Self {
            goals: payload.goals,
            settings: payload.settings,
        }
    }

    /// Wraps a payload and immediately reschedules it, e.g. after an import
    /// or a merge that may have left too many goals active.
    pub fn import(payload: MergePayload, now: Timestamp) -> Self {
        let mut store = Self::from_payload(payload);
        store.reschedule(now);
        store
    }

    /// Exports the store as a freshly stamped payload.
    pub fn to_payload(&self, now: Timestamp) -> MergePayload {
        MergePayload::new(self.goals.clone(), self.settings.clone(), now)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Maximum number of simultaneously active goals.
    pub fn capacity(&self) -> usize {
        self.settings.max_active_goals
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.goals.iter().position(|goal| goal.id == id)
    }

    /// Creates a goal, records its creation and schedules it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` for an empty title or a rating
    /// outside 1..=5; nothing is stored in that case.
    pub fn create(&mut self, params: &CreateGoal, now: Timestamp) -> Result<&Goal> {
        params.validate()?;

        let mut goal = Goal::new(
            params.title.trim().to_string(),
            params.description.clone().unwrap_or_default(),
            params.motivation,
            params.urgency,
            params.deadline,
            now,
        );
        let after = ledger::snapshot(&goal, now);
        let changes = ledger::diff(&Snapshot::default(), &after);
        ledger::record(&mut goal, HistoryEvent::Created, None, Some(after), changes, None, now);

        info!("Created goal {} ({})", goal.id, goal.title);
        self.goals.push(goal);
        let index = self.goals.len() - 1;
        self.reschedule(now);
        Ok(&self.goals[index])
    }

    /// Applies a partial update. Returns `Ok(None)` for an unknown id.
    ///
    /// An update that changes nothing leaves the goal, including
    /// `last_updated`, untouched and writes no history.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` when a provided field is invalid.
    pub fn update(&mut self, id: &str, params: &UpdateGoal, now: Timestamp) -> Result<Option<&Goal>> {
        params.validate()?;
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let goal = &mut self.goals[index];
        let before = ledger::snapshot(goal, now);
        if let Some(title) = &params.title {
            goal.title = title.trim().to_string();
        }
        if let Some(description) = &params.description {
            goal.description.clone_from(description);
        }
        if let Some(motivation) = params.motivation {
            goal.motivation = motivation;
        }
        if let Some(urgency) = params.urgency {
            goal.urgency = urgency;
        }
        if let Some(deadline) = params.deadline {
            goal.deadline = deadline;
        }
        let after = ledger::snapshot(goal, now);

        let changes = ledger::diff(&before, &after);
        if changes.is_empty() {
            debug!("Update of goal {id} changed nothing");
            return Ok(Some(&self.goals[index]));
        }

        let reschedule = touches_schedule(&changes);
        goal.last_updated = now;
        ledger::record(goal, HistoryEvent::Updated, Some(before), Some(after), changes, None, now);

        if reschedule {
            self.reschedule(now);
        }
        Ok(Some(&self.goals[index]))
    }

    /// Sets a status on behalf of the user and reschedules.
    ///
    /// Marking a goal completed or abandoned frees its slot; reopening one
    /// (setting `active` or `paused`) hands it back to the scheduler, which
    /// decides its final state.
    pub fn set_status(&mut self, id: &str, status: GoalStatus, now: Timestamp) -> Option<&Goal> {
        let index = self.position(id)?;
        if self.transition(index, status, now) {
            info!("Goal {id} set to {}", status.as_str());
            self.reschedule(now);
        }
        Some(&self.goals[index])
    }

    /// Removes a goal for good and returns it. Deleting an active goal frees
    /// a slot, so the remaining goals are rescheduled.
    pub fn delete(&mut self, id: &str, now: Timestamp) -> Option<Goal> {
        let index = self.position(id)?;
        let removed = self.goals.remove(index);
        info!("Deleted goal {id}");
        if removed.status == GoalStatus::Active {
            self.reschedule(now);
        }
        Some(removed)
    }

    /// Rolls a goal back to the state before history entry `entry_id`.
    ///
    /// Returns `None` when the goal or entry is unknown or the entry has no
    /// recoverable prior state; the goal is untouched in that case.
    pub fn revert(&mut self, id: &str, entry_id: &str, now: Timestamp) -> Option<&Goal> {
        let index = self.position(id)?;
        ledger::revert(&mut self.goals[index], entry_id, now)?;
        info!("Reverted goal {id} to entry {entry_id}");
        self.reschedule(now);
        Some(&self.goals[index])
    }

    /// Logs a check-in on a goal.
    pub fn check_in(&mut self, id: &str, now: Timestamp) -> Option<&Goal> {
        let index = self.position(id)?;
        let goal = &mut self.goals[index];
        goal.check_in_dates.push(now);
        goal.last_updated = now;
        Some(&self.goals[index])
    }

    /// Changes the number of goals allowed to be active at once.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` for a capacity of zero.
    pub fn set_capacity(&mut self, capacity: usize, now: Timestamp) -> Result<Activation> {
        if capacity == 0 {
            return Err(TrackerError::invalid_input("maxActiveGoals")
                .with_reason("At least one goal must be allowed to be active"));
        }
        self.settings.max_active_goals = capacity;
        Ok(self.reschedule(now))
    }

    /// Runs the scheduler and applies its decision.
    pub fn reschedule(&mut self, now: Timestamp) -> Activation {
        let plan = priority::auto_activate(&self.goals, self.capacity(), now);

        let targets = plan
            .to_activate
            .iter()
            .map(|id| (id, GoalStatus::Active))
            .chain(plan.to_pause.iter().map(|id| (id, GoalStatus::Paused)));
        for (id, status) in targets {
            if let Some(index) = self.position(id) {
                self.transition(index, status, now);
            }
        }

        debug!(
            "Scheduled {} active, {} paused (capacity {})",
            plan.to_activate.len(),
            plan.to_pause.len(),
            self.capacity()
        );
        plan
    }

    /// Moves one goal to `status` with an audit entry. Returns whether
    /// anything changed.
    fn transition(&mut self, index: usize, status: GoalStatus, now: Timestamp) -> bool {
        let goal = &mut self.goals[index];
        if goal.status == status {
            return false;
        }

        let before = ledger::snapshot(goal, now);
        goal.status = status;
        goal.last_updated = now;
        let after = ledger::snapshot(goal, now);
        let changes = ledger::diff(&before, &after);
        ledger::record(goal, HistoryEvent::StatusChange, Some(before), Some(after), changes, None, now);
        true
    }
}

/// Whether a change list touches an input of the priority formula.
fn touches_schedule(changes: &[FieldChange]) -> bool {
    const SCHEDULE_FIELDS: [TrackedField; 4] = [
        TrackedField::Motivation,
        TrackedField::Urgency,
        TrackedField::Deadline,
        TrackedField::Priority,
    ];
    changes
        .iter()
        .any(|change| SCHEDULE_FIELDS.iter().any(|f| f.as_str() == change.field))
}
