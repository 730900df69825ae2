//! Goal operations for the Tracker.

use jiff::Timestamp;

use crate::{
    display::Goals,
    error::{Result, TrackerError},
    models::{Goal, GoalStatus, History, Settings},
    params::{CreateGoal, Id, RevertGoal, SetStatus, UpdateGoal},
    priority::{self, Activation},
    store::GoalStore,
};

use super::Tracker;

impl Tracker {
    /// Creates a goal and schedules it.
    pub async fn create_goal(&self, params: &CreateGoal) -> Result<Goal> {
        let params = params.clone();
        self.mutate(move |store, now| store.create(&params, now).cloned())
            .await
    }

    /// Retrieves a goal by its ID.
    pub async fn get_goal(&self, params: &Id) -> Result<Option<Goal>> {
        let id = params.id.clone();
        self.read(move |store, _| store.get(&id).cloned()).await
    }

    /// Lists goals in scheduling order: ranked open goals first, then
    /// completed and abandoned ones.
    pub async fn list_goals(&self) -> Result<Vec<Goal>> {
        self.read(ordered).await
    }

    /// Same as [`Tracker::list_goals`], wrapped for display with priorities
    /// evaluated at the time of the read.
    pub async fn goals_overview(&self) -> Result<Goals> {
        self.read(|store, now| Goals::new(ordered(store, now), now))
            .await
    }

    /// Applies a partial update to a goal. `Ok(None)` if it does not exist.
    pub async fn update_goal(&self, id: &str, params: UpdateGoal) -> Result<Option<Goal>> {
        let id = id.to_string();
        self.mutate(move |store, now| Ok(store.update(&id, &params, now)?.cloned()))
            .await
    }

    /// Sets a goal's status on behalf of the user.
    pub async fn set_status(&self, params: &SetStatus) -> Result<Option<Goal>> {
        let SetStatus { id, status } = params.clone();
        self.mutate(move |store, now| Ok(store.set_status(&id, status, now).cloned()))
            .await
    }

    /// Marks a goal completed.
    pub async fn complete_goal(&self, params: &Id) -> Result<Option<Goal>> {
        self.set_status(&SetStatus {
            id: params.id.clone(),
            status: GoalStatus::Completed,
        })
        .await
    }

    /// Permanently deletes a goal, returning the removed goal.
    pub async fn delete_goal(&self, params: &Id) -> Result<Option<Goal>> {
        let id = params.id.clone();
        self.mutate(move |store, now| Ok(store.delete(&id, now)))
            .await
    }

    /// Rolls a goal back to the state before a history entry. `Ok(None)`
    /// when the goal or entry is unknown or the rollback is not possible.
    pub async fn revert_goal(&self, params: &RevertGoal) -> Result<Option<Goal>> {
        let RevertGoal { id, entry_id } = params.clone();
        self.mutate(move |store, now| Ok(store.revert(&id, &entry_id, now).cloned()))
            .await
    }

    /// Records a check-in on a goal.
    pub async fn check_in(&self, params: &Id) -> Result<Option<Goal>> {
        let id = params.id.clone();
        self.mutate(move |store, now| Ok(store.check_in(&id, now).cloned()))
            .await
    }

    /// Returns a goal's audit history.
    pub async fn history(&self, params: &Id) -> Result<Option<History>> {
        let id = params.id.clone();
        self.read(move |store, _| store.get(&id).map(|goal| goal.history.clone()))
            .await
    }

    /// Current settings.
    pub async fn settings(&self) -> Result<Settings> {
        self.read(|store, _| store.settings().clone()).await
    }

    /// Changes how many goals may be active at once and reschedules.
    pub async fn set_capacity(&self, capacity: usize) -> Result<Activation> {
        self.mutate(move |store, now| store.set_capacity(capacity, now))
            .await
    }

    /// Re-runs the scheduler, e.g. after deadlines moved closer.
    pub async fn reschedule(&self) -> Result<Activation> {
        self.mutate(|store, now| Ok::<_, TrackerError>(store.reschedule(now)))
            .await
    }
}

fn ordered(store: &GoalStore, now: Timestamp) -> Vec<Goal> {
    let mut goals: Vec<Goal> = priority::rank(store.goals(), now)
        .into_iter()
        .map(|ranked| ranked.goal.clone())
        .collect();
    goals.extend(store.goals().iter().filter(|g| g.is_terminal()).cloned());
    goals
}
