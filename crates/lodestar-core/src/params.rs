//! Parameter structures for goal operations.
//!
//! These are shared by every interface (the CLI today) and carry no framework
//! derives. Interface layers define their own argument types and convert into
//! these with `From` impls, keeping clap out of the core crate.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    models::{GoalStatus, RATING_MAX, RATING_MIN},
};

/// Parameters for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoal {
    pub title: String,
    pub description: Option<String>,
    pub motivation: u8,
    pub urgency: u8,
    pub deadline: Option<Timestamp>,
}

impl CreateGoal {
    /// Checks title and ratings.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_rating("motivation", self.motivation)?;
        validate_rating("urgency", self.urgency)
    }
}

/// Partial update of a goal's editable fields. `None` leaves a field as is.
///
/// `deadline` is doubly optional: `Some(None)` clears the deadline.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoal {
    pub title: Option<String>,
    pub description: Option<String>,
    pub motivation: Option<u8>,
    pub urgency: Option<u8>,
    pub deadline: Option<Option<Timestamp>>,
}

impl UpdateGoal {
    /// Checks every field that is being set.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(motivation) = self.motivation {
            validate_rating("motivation", motivation)?;
        }
        if let Some(urgency) = self.urgency {
            validate_rating("urgency", urgency)?;
        }
        Ok(())
    }
}

/// Parameters for an explicit status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatus {
    pub id: String,
    pub status: GoalStatus,
}

/// Parameters for rolling a goal back to a history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevertGoal {
    pub id: String,
    pub entry_id: String,
}

/// Generic parameters for operations requiring just a goal ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    pub id: String,
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TrackerError::invalid_input("title").with_reason("Title must not be empty"));
    }
    Ok(())
}

fn validate_rating(field: &str, value: u8) -> Result<()> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(TrackerError::invalid_input(field)
            .with_reason(format!("Must be between {RATING_MIN} and {RATING_MAX}, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, motivation: u8) -> CreateGoal {
        CreateGoal {
            title: title.to_string(),
            description: None,
            motivation,
            urgency: 3,
            deadline: None,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create("Learn piano", 4).validate().is_ok());
        assert!(matches!(
            create("   ", 4).validate(),
            Err(TrackerError::InvalidInput { ref field, .. }) if field == "title"
        ));
        assert!(matches!(
            create("Learn piano", 6).validate(),
            Err(TrackerError::InvalidInput { ref field, .. }) if field == "motivation"
        ));
    }

    #[test]
    fn test_update_validates_only_set_fields() {
        assert!(UpdateGoal::default().validate().is_ok());

        let bad_urgency = UpdateGoal {
            urgency: Some(0),
            ..Default::default()
        };
        assert!(bad_urgency.validate().is_err());

        let empty_title = UpdateGoal {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_title.validate().is_err());
    }
}
