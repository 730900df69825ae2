//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalDate;
use crate::{
    models::{Goal, History},
    priority,
};

/// Newtype wrapper for displaying a list of goals.
///
/// Each goal renders as a compact summary with its current priority, which
/// is evaluated at the instant given to [`Goals::new`].
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use lodestar_core::{display::Goals, models::Goal};
///
/// let now = Timestamp::now();
/// let goal = Goal::new("Learn Rust".to_string(), String::new(), 5, 3, None, now);
/// let output = Goals::new(vec![goal], now).to_string();
/// assert!(output.contains("## Learn Rust"));
/// assert!(output.contains("**Priority**: 35"));
/// ```
pub struct Goals {
    goals: Vec<Goal>,
    now: Timestamp,
}

impl Goals {
    pub fn new(goals: Vec<Goal>, now: Timestamp) -> Self {
        Self { goals, now }
    }
}

impl fmt::Display for Goals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.goals.is_empty() {
            return writeln!(f, "No goals found.");
        }

        for goal in &self.goals {
            writeln!(f, "## {} ({})", goal.title, goal.status.with_icon())?;
            writeln!(f)?;
            writeln!(f, "- **ID**: {}", goal.id)?;
            if goal.is_terminal() {
                writeln!(
                    f,
                    "- **Motivation**: {} · **Urgency**: {}",
                    goal.motivation, goal.urgency
                )?;
            } else {
                writeln!(
                    f,
                    "- **Priority**: {} (motivation {}, urgency {})",
                    priority::priority(goal, self.now),
                    goal.motivation,
                    goal.urgency
                )?;
            }
            if let Some(deadline) = &goal.deadline {
                let days = priority::days_until(*deadline, self.now);
                let when = match days {
                    d if d < 0 => format!("{} days overdue", -d),
                    0 => "due today".to_string(),
                    1 => "1 day left".to_string(),
                    d => format!("{d} days left"),
                };
                writeln!(f, "- **Deadline**: {} ({when})", LocalDate(deadline))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a goal's history, newest entry first.
pub struct HistoryLog(pub History);

impl fmt::Display for HistoryLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No history recorded.");
        }

        let entries: Vec<_> = self.0.iter().collect();
        for entry in entries.into_iter().rev() {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
