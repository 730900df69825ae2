use jiff::Timestamp;
use serde_json::json;

use crate::models::{
    FieldChange, Goal, GoalStatus, History, HistoryEntry, HistoryEvent, MergePayload, Settings,
    Snapshot, DEFAULT_MAX_ACTIVE_GOALS, SCHEMA_VERSION,
};

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn create_test_goal(status: GoalStatus) -> Goal {
    let mut goal = Goal::new(
        "Learn to juggle".to_string(),
        "Three balls, then five".to_string(),
        4,
        2,
        Some(ts("2022-02-01T00:00:00Z")),
        Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
    );
    goal.id = "goal-1".to_string();
    goal.status = status;
    goal.last_updated = Timestamp::from_second(1641081600).unwrap(); // 2022-01-02 00:00:00 UTC
    goal
}

#[test]
fn test_goal_serialises_camel_case() {
    let goal = create_test_goal(GoalStatus::Active);
    let value = serde_json::to_value(&goal).unwrap();

    assert_eq!(value["id"], "goal-1");
    assert_eq!(value["status"], "active");
    assert_eq!(value["createdAt"], "2022-01-01T00:00:00Z");
    assert_eq!(value["lastUpdated"], "2022-01-02T00:00:00Z");
    assert_eq!(value["deadline"], "2022-02-01T00:00:00Z");
    assert_eq!(value["checkInDates"], json!([]));
    assert_eq!(value["history"], json!([]));
}

#[test]
fn test_goal_round_trip_preserves_history() {
    let mut goal = create_test_goal(GoalStatus::Paused);
    goal.history = History::from(vec![HistoryEntry {
        id: "h1".to_string(),
        event: HistoryEvent::StatusChange,
        timestamp: ts("2022-01-02T00:00:00Z"),
        changes: vec![FieldChange {
            field: "status".to_string(),
            from: json!("active"),
            to: json!("paused"),
        }],
        before: Some(Snapshot {
            status: Some(GoalStatus::Active),
            ..Default::default()
        }),
        after: Some(Snapshot {
            status: Some(GoalStatus::Paused),
            ..Default::default()
        }),
        meta: None,
    }]);

    let json = serde_json::to_string(&goal).unwrap();
    assert!(json.contains(r#""event":"status-change""#));
    assert!(!json.contains("meta"));
    let back: Goal = serde_json::from_str(&json).unwrap();
    assert_eq!(back, goal);
}

#[test]
fn test_goal_lenient_fields() {
    let goal: Goal = serde_json::from_value(json!({
        "id": "g",
        "title": "Loose",
        "motivation": 9,
        "urgency": "oops",
        "deadline": "",
        "createdAt": 1640995200000_i64,
        "checkInDates": ["2022-01-03", "never", "2022-01-04T10:00:00Z"]
    }))
    .unwrap();

    assert_eq!(goal.motivation, 5);
    assert_eq!(goal.urgency, 3);
    assert_eq!(goal.deadline, None);
    assert_eq!(goal.status, GoalStatus::Paused);
    assert_eq!(goal.created_at, ts("2022-01-01T00:00:00Z"));
    assert_eq!(goal.last_updated, Timestamp::UNIX_EPOCH);
    assert_eq!(
        goal.check_in_dates,
        vec![ts("2022-01-03T00:00:00Z"), ts("2022-01-04T10:00:00Z")]
    );
    assert!(goal.history.is_empty());
}

#[test]
fn test_payload_defaults() {
    let payload = MergePayload::from_json("{}").unwrap();
    assert!(payload.goals.is_empty());
    assert_eq!(payload.export_date, None);
    assert_eq!(payload.settings.max_active_goals, DEFAULT_MAX_ACTIVE_GOALS);

    let fresh = MergePayload::default();
    assert_eq!(fresh.version, SCHEMA_VERSION);
}

#[test]
fn test_payload_null_collections() {
    let payload = MergePayload::from_json(
        r#"{"version": null, "exportDate": null, "goals": null, "settings": null}"#,
    )
    .unwrap();
    assert!(payload.goals.is_empty());
    assert_eq!(payload.version, "");
    assert_eq!(payload.export_date, None);
    assert_eq!(payload.settings, Settings::default());
}

#[test]
fn test_goal_null_fields() {
    let goal: Goal = serde_json::from_value(json!({
        "id": "g",
        "title": null,
        "description": null,
        "status": null,
        "history": null,
        "checkInDates": null
    }))
    .unwrap();
    assert_eq!(goal.title, "");
    assert_eq!(goal.description, "");
    assert_eq!(goal.status, GoalStatus::Paused);
    assert!(goal.history.is_empty());
    assert!(goal.check_in_dates.is_empty());

    let entry: HistoryEntry = serde_json::from_value(json!({
        "id": "h",
        "event": "updated",
        "changes": null
    }))
    .unwrap();
    assert!(entry.changes.is_empty());
}

#[test]
fn test_settings_lenient_capacity() {
    let capacity = |value: serde_json::Value| {
        serde_json::from_value::<Settings>(json!({"maxActiveGoals": value, "theme": "dark"}))
            .unwrap()
            .max_active_goals
    };
    assert_eq!(capacity(json!("4")), 4);
    assert_eq!(capacity(json!(2.0)), 2);
    assert_eq!(capacity(json!(null)), DEFAULT_MAX_ACTIVE_GOALS);
    assert_eq!(capacity(json!(0)), DEFAULT_MAX_ACTIVE_GOALS);
    assert_eq!(capacity(json!(-1)), DEFAULT_MAX_ACTIVE_GOALS);
    assert_eq!(capacity(json!("lots")), DEFAULT_MAX_ACTIVE_GOALS);

    let payload =
        MergePayload::from_json(r#"{"goals": [], "settings": {"maxActiveGoals": "3"}}"#).unwrap();
    assert_eq!(payload.settings.max_active_goals, 3);
}

#[test]
fn test_payload_rejects_non_json() {
    assert!(MergePayload::from_json("not json").is_err());
}

#[test]
fn test_settings_keep_unknown_keys() {
    let settings: Settings =
        serde_json::from_value(json!({"maxActiveGoals": 4, "theme": "dark", "weekStart": 1}))
            .unwrap();
    assert_eq!(settings.max_active_goals, 4);

    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(
        value,
        json!({"maxActiveGoals": 4, "theme": "dark", "weekStart": 1})
    );
}

#[test]
fn test_payload_json_round_trip() {
    let payload = MergePayload::new(
        vec![create_test_goal(GoalStatus::Completed)],
        Settings::default(),
        ts("2022-01-05T00:00:00Z"),
    );
    let json = payload.to_json().unwrap();
    assert!(json.contains(r#""exportDate": "2022-01-05T00:00:00Z""#));
    assert_eq!(MergePayload::from_json(&json).unwrap(), payload);
}

#[test]
fn test_goal_status_parse() {
    assert_eq!("Active".parse::<GoalStatus>(), Ok(GoalStatus::Active));
    assert_eq!("done".parse::<GoalStatus>(), Ok(GoalStatus::Completed));
    assert!("someday".parse::<GoalStatus>().is_err());
    assert!(GoalStatus::Abandoned.is_terminal());
    assert!(!GoalStatus::Paused.is_terminal());
}

#[test]
fn test_goal_display() {
    let goal = create_test_goal(GoalStatus::Active);
    let output = goal.to_string();

    assert!(output.starts_with("# Learn to juggle (➤ Active)"));
    assert!(output.contains("- ID: goal-1"));
    assert!(output.contains("- Motivation: 4/5"));
    assert!(output.contains("- Deadline: 2022-02-01"));
    assert!(output.contains("Three balls, then five"));
    assert!(!output.contains("Check-ins"));
}

#[test]
fn test_goal_display_check_ins() {
    let mut goal = create_test_goal(GoalStatus::Paused);
    goal.deadline = None;
    goal.description.clear();
    goal.check_in_dates = vec![ts("2022-01-03T00:00:00Z"), ts("2022-01-04T00:00:00Z")];

    let output = goal.to_string();
    assert!(output.contains("- Check-ins: 2"));
    assert!(!output.contains("Deadline"));
}

#[test]
fn test_history_entry_display() {
    let entry = HistoryEntry {
        id: "h2".to_string(),
        event: HistoryEvent::Rollback,
        timestamp: ts("2022-01-02T00:00:00Z"),
        changes: vec![FieldChange {
            field: "deadline".to_string(),
            from: json!("2022-02-01T00:00:00Z"),
            to: json!(null),
        }],
        before: None,
        after: None,
        meta: Some(json!({"revertedTo": "h1"})),
    };
    let output = entry.to_string();
    assert!(output.starts_with("- **rollback**"));
    assert!(output.contains("(reverted to `h1`)"));
    assert!(output.contains("  - deadline: 2022-02-01T00:00:00Z → (none)"));
}
