//! Display implementations for domain models.
//!
//! Goals render as a markdown section with a metadata list; history entries
//! render as one bullet per entry with a nested bullet per field change.

use std::fmt;

use serde_json::Value;

use super::datetime::{LocalDate, LocalDateTime};
use crate::models::{FieldChange, Goal, GoalStatus, HistoryEntry, HistoryEvent};

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Motivation: {}/5", self.motivation)?;
        writeln!(f, "- Urgency: {}/5", self.urgency)?;
        if let Some(deadline) = &self.deadline {
            writeln!(f, "- Deadline: {}", LocalDate(deadline))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.last_updated))?;
        if let Some(last) = self.check_in_dates.last() {
            writeln!(
                f,
                "- Check-ins: {} (last {})",
                self.check_in_dates.len(),
                LocalDateTime(last)
            )?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        Ok(())
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.field,
            ChangeValue(&self.from),
            ChangeValue(&self.to)
        )
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** {} `{}`",
            self.event,
            LocalDateTime(&self.timestamp),
            self.id
        )?;
        if let Some(target) = self.reverted_to() {
            write!(f, " (reverted to `{target}`)")?;
        }
        writeln!(f)?;

        for change in &self.changes {
            writeln!(f, "  - {change}")?;
        }
        Ok(())
    }
}

/// Renders a JSON change value without quoting plain strings.
struct ChangeValue<'a>(&'a Value);

impl fmt::Display for ChangeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => write!(f, "(none)"),
            Value::String(s) if s.is_empty() => write!(f, "(empty)"),
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}
