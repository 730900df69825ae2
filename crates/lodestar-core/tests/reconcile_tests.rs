//! End-to-end behaviour of the scheduling, ledger and merge engines.

use jiff::{SignedDuration, Timestamp};
use lodestar_core::{
    ledger,
    models::{Goal, GoalStatus, HistoryEvent, MergePayload, Settings},
    params::{CreateGoal, UpdateGoal},
    priority, reconcile, GoalStore,
};

fn t(minutes: i64) -> Timestamp {
    "2026-03-01T12:00:00Z".parse::<Timestamp>().unwrap() + SignedDuration::from_mins(minutes)
}

fn params(title: &str, motivation: u8, urgency: u8) -> CreateGoal {
    CreateGoal {
        title: title.to_string(),
        description: None,
        motivation,
        urgency,
        deadline: None,
    }
}

fn store(capacity: usize) -> GoalStore {
    GoalStore::new(Settings {
        max_active_goals: capacity,
        ..Settings::default()
    })
}

fn find<'a>(payload: &'a MergePayload, id: &str) -> &'a Goal {
    payload.goals.iter().find(|g| g.id == id).unwrap()
}

#[test]
fn test_deadline_today_adds_full_bonus() {
    let now = t(0);
    let mut goal = Goal::new("Ship".to_string(), String::new(), 5, 5, None, now);
    assert_eq!(priority::priority(&goal, now), 55);

    goal.deadline = Some(now);
    assert_eq!(priority::priority(&goal, now), 85);
}

#[test]
fn test_capacity_two_keeps_older_of_equal_goals() {
    let mut urgent = Goal::new("Urgent".to_string(), String::new(), 5, 5, Some(t(0)), t(0));
    urgent.id = "urgent".to_string();
    let mut older = Goal::new("Older".to_string(), String::new(), 5, 5, None, t(1));
    older.id = "older".to_string();
    let mut newer = Goal::new("Newer".to_string(), String::new(), 5, 5, None, t(2));
    newer.id = "newer".to_string();

    let plan = priority::auto_activate(&[newer, urgent, older], 2, t(0));
    assert_eq!(plan.to_activate, vec!["urgent", "older"]);
    assert_eq!(plan.to_pause, vec!["newer"]);
}

#[test]
fn test_one_sided_title_edit_survives_merge() {
    let mut device = store(3);
    let id = device.create(&params("X", 3, 3), t(0)).unwrap().id.clone();
    let base = device.to_payload(t(1));

    let remote = base.clone();
    device
        .update(
            &id,
            &UpdateGoal {
                title: Some("Y".to_string()),
                ..Default::default()
            },
            t(2),
        )
        .unwrap();
    let local = device.to_payload(t(3));

    let merged = reconcile::merge(Some(&base), &local, &remote, t(4));
    assert_eq!(find(&merged, &id).title, "Y");

    // Symmetric: the unchanged side loses no matter which one it is
    let merged = reconcile::merge(Some(&base), &remote, &local, t(4));
    assert_eq!(find(&merged, &id).title, "Y");
}

#[test]
fn test_histories_from_both_devices_are_unioned() {
    let mut device = store(3);
    let id = device.create(&params("Shared", 3, 3), t(0)).unwrap().id.clone();
    let base = device.to_payload(t(1));

    let mut phone = GoalStore::from_payload(base.clone());
    phone
        .update(
            &id,
            &UpdateGoal {
                urgency: Some(4),
                ..Default::default()
            },
            t(5),
        )
        .unwrap();
    let mut laptop = GoalStore::from_payload(base.clone());
    laptop
        .update(
            &id,
            &UpdateGoal {
                motivation: Some(1),
                ..Default::default()
            },
            t(3),
        )
        .unwrap();

    let merged = reconcile::merge(
        Some(&base),
        &laptop.to_payload(t(6)),
        &phone.to_payload(t(6)),
        t(7),
    );
    let goal = find(&merged, &id);

    // Both edits changed the goal; the later one (phone) wins the fields
    assert_eq!(goal.urgency, 4);
    assert_eq!(goal.motivation, 3);

    let base_len = find(&base, &id).history.len();
    assert_eq!(goal.history.len(), base_len + 2);
    let stamps: Vec<Timestamp> = goal.history.iter().map(|e| e.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    let mut ids: Vec<&str> = goal.history.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), goal.history.len());
}

#[test]
fn test_revert_of_creation_is_not_possible() {
    let mut device = store(3);
    let id = device.create(&params("Fresh", 3, 3), t(0)).unwrap().id.clone();
    let created = device.get(&id).unwrap().history.iter().next().unwrap().clone();
    assert_eq!(created.event, HistoryEvent::Created);
    assert!(created.before.is_none());

    let before = device.get(&id).unwrap().clone();
    assert!(device.revert(&id, &created.id, t(1)).is_none());
    assert_eq!(device.get(&id).unwrap(), &before);
}

#[test]
fn test_merging_identical_payloads_is_identity() {
    let mut device = store(2);
    device.create(&params("A", 5, 5), t(0)).unwrap();
    device.create(&params("B", 2, 4), t(1)).unwrap();
    device.create(&params("C", 1, 1), t(2)).unwrap();
    let payload = device.to_payload(t(3));

    let merged = reconcile::merge(Some(&payload), &payload, &payload, t(4));
    assert_eq!(merged.goals, payload.goals);
    assert_eq!(merged.settings, payload.settings);
    assert_eq!(merged.export_date, Some(t(4)));
}

#[test]
fn test_merge_is_deterministic() {
    let mut device = store(3);
    device.create(&params("A", 5, 5), t(0)).unwrap();
    let base = device.to_payload(t(1));
    let mut local = GoalStore::from_payload(base.clone());
    local.create(&params("L", 2, 2), t(2)).unwrap();
    let mut remote = GoalStore::from_payload(base.clone());
    remote.create(&params("R", 2, 2), t(3)).unwrap();
    let (local, remote) = (local.to_payload(t(4)), remote.to_payload(t(5)));

    let first = reconcile::merge(Some(&base), &local, &remote, t(6));
    let second = reconcile::merge(Some(&base), &local, &remote, t(6));
    assert_eq!(first, second);
    assert_eq!(first.goals.len(), 3);
}

#[test]
fn test_history_never_shrinks_below_inputs_through_merge() {
    let mut device = store(3);
    let id = device.create(&params("Busy", 3, 3), t(0)).unwrap().id.clone();
    for i in 1..=60 {
        device
            .update(
                &id,
                &UpdateGoal {
                    title: Some(format!("Busy {i}")),
                    ..Default::default()
                },
                t(i),
            )
            .unwrap();
    }
    assert_eq!(device.get(&id).unwrap().history.len(), ledger::MAX_HISTORY);

    let payload = device.to_payload(t(100));
    let merged = reconcile::merge_two(&payload, &payload, t(101));
    assert_eq!(find(&merged, &id).history.len(), ledger::MAX_HISTORY);
    assert!(ledger::MAX_HISTORY <= reconcile::MAX_MERGED_HISTORY);
}

#[test]
fn test_merge_then_import_respects_capacity() {
    let mut local = store(1);
    local.create(&params("Local", 5, 5), t(0)).unwrap();
    let mut remote = store(1);
    remote.create(&params("Remote", 5, 4), t(1)).unwrap();

    let merged = reconcile::merge_two(&local.to_payload(t(2)), &remote.to_payload(t(3)), t(4));
    let both_active = merged
        .goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .count();
    assert_eq!(both_active, 2);

    let store = GoalStore::import(merged, t(5));
    let active: Vec<&str> = store
        .goals()
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .map(|g| g.title.as_str())
        .collect();
    assert_eq!(active, vec!["Local"]);
}

#[test]
fn test_malformed_local_timestamps_lose_to_valid_remote() {
    let local = MergePayload::from_json(
        r#"{
            "exportDate": "not a date",
            "goals": [
                {"id": "g1", "title": "Local copy", "createdAt": "garbage", "lastUpdated": "garbage"},
                {"id": "g2", "title": "Only here", "lastUpdated": null, "history": null}
            ],
            "settings": {"maxActiveGoals": 1}
        }"#,
    )
    .unwrap();
    let remote = MergePayload::from_json(
        r#"{
            "goals": [
                {"id": "g1", "title": "Remote copy", "createdAt": "2026-01-01", "lastUpdated": "2026-02-01T08:00:00Z"}
            ],
            "settings": {"maxActiveGoals": "4"}
        }"#,
    )
    .unwrap();
    assert_eq!(local.export_date, None);
    assert_eq!(remote.export_date, None);

    let outcome = reconcile::merge_with_report(None, &local, &remote, t(0));
    assert_eq!(find(&outcome.payload, "g1").title, "Remote copy");
    assert_eq!(find(&outcome.payload, "g2").title, "Only here");
    assert_eq!(outcome.report.remote_wins, 1);
    assert_eq!(outcome.report.local_only, 1);

    // Neither side has a readable export date, so local settings are kept
    assert_eq!(outcome.report.settings_from, Some(reconcile::Side::Local));
    assert_eq!(outcome.payload.settings.max_active_goals, 1);

    // A readable export date beats a missing one
    let mut dated = remote.clone();
    dated.export_date = Some(t(0));
    let outcome = reconcile::merge_with_report(None, &local, &dated, t(1));
    assert_eq!(outcome.report.settings_from, Some(reconcile::Side::Remote));
    assert_eq!(outcome.payload.settings.max_active_goals, 4);
}
