use lodestar_core::{params::CreateGoal, Tracker, TrackerBuilder};
use tempfile::TempDir;

/// Helper function to create a tracker backed by a throwaway database
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Creation parameters with no description and no deadline
#[allow(dead_code)]
pub fn goal_params(title: &str, motivation: u8, urgency: u8) -> CreateGoal {
    CreateGoal {
        title: title.to_string(),
        description: None,
        motivation,
        urgency,
        deadline: None,
    }
}
