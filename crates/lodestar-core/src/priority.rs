//! Goal priority and capacity-bound auto-activation.
//!
//! Priority is `motivation + urgency * 10` plus a deadline bonus that grows
//! from 0 to 30 over the final 30 days before the deadline. Overdue goals
//! keep the full bonus.
//!
//! [`auto_activate`] ranks every non-terminal goal and splits the ranking at
//! the capacity limit. The ranking is a total order (priority, then creation
//! time, then id), so the result never depends on the order of the input.
//!
//! ```rust
//! use jiff::Timestamp;
//! use lodestar_core::{models::Goal, priority};
//!
//! let now: Timestamp = "2026-05-01T12:00:00Z".parse().unwrap();
//! let mut goal = Goal::new("Ship it".into(), String::new(), 5, 5, None, now);
//! assert_eq!(priority::priority(&goal, now), 55);
//!
//! goal.deadline = Some(now);
//! assert_eq!(priority::priority(&goal, now), 85);
//! ```

use std::cmp::Ordering;

use jiff::Timestamp;

use crate::models::Goal;

/// Deadlines further out than this many days earn no bonus.
pub const DEADLINE_WINDOW_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days from `now` until `deadline`, rounded up. Negative when the
/// deadline has passed by at least a full day.
pub fn days_until(deadline: Timestamp, now: Timestamp) -> i64 {
    let secs = deadline.as_second() - now.as_second();
    secs.div_euclid(SECONDS_PER_DAY) + i64::from(secs.rem_euclid(SECONDS_PER_DAY) != 0)
}

/// Bonus points for an approaching or passed deadline.
pub fn deadline_bonus(deadline: Option<Timestamp>, now: Timestamp) -> i64 {
    let Some(deadline) = deadline else {
        return 0;
    };
    let days = days_until(deadline, now);
    if days > DEADLINE_WINDOW_DAYS {
        0
    } else {
        DEADLINE_WINDOW_DAYS - days.max(0)
    }
}

/// Scheduling priority of a goal at `now`. Higher runs first.
pub fn priority(goal: &Goal, now: Timestamp) -> i64 {
    i64::from(goal.motivation) + i64::from(goal.urgency) * 10 + deadline_bonus(goal.deadline, now)
}

/// Outcome of a scheduling pass: goal ids to run and goal ids to hold back,
/// both in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    pub to_activate: Vec<String>,
    pub to_pause: Vec<String>,
}

/// A schedulable goal with its computed priority.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub goal: &'a Goal,
    pub priority: i64,
}

fn compare(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.goal.created_at.cmp(&b.goal.created_at))
        .then_with(|| a.goal.id.cmp(&b.goal.id))
}

/// Non-terminal goals sorted by descending priority, oldest first on ties.
pub fn rank(goals: &[Goal], now: Timestamp) -> Vec<Ranked<'_>> {
    let mut ranked: Vec<Ranked<'_>> = goals
        .iter()
        .filter(|goal| !goal.is_terminal())
        .map(|goal| Ranked {
            goal,
            priority: priority(goal, now),
        })
        .collect();
    ranked.sort_by(compare);
    ranked
}

/// Picks the top `capacity` schedulable goals to activate; the rest pause.
///
/// Terminal goals appear in neither list.
pub fn auto_activate(goals: &[Goal], capacity: usize, now: Timestamp) -> Activation {
    let ranked = rank(goals, now);
    let split = capacity.min(ranked.len());
    let (active, paused) = ranked.split_at(split);

    Activation {
        to_activate: active.iter().map(|r| r.goal.id.clone()).collect(),
        to_pause: paused.iter().map(|r| r.goal.id.clone()).collect(),
    }
}
