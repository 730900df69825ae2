use lodestar_core::{
    db::{Database, Slot},
    models::{MergePayload, Settings},
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn sample_payload(capacity: usize) -> MergePayload {
    let settings = Settings {
        max_active_goals: capacity,
        ..Settings::default()
    };
    MergePayload::new(Vec::new(), settings, jiff::Timestamp::UNIX_EPOCH)
}

#[test]
fn test_empty_database_has_no_payloads() {
    let (_temp_file, db) = create_test_db();
    assert!(db.load_payload(Slot::Current).unwrap().is_none());
    assert!(db.load_payload(Slot::SyncBase).unwrap().is_none());
}

#[test]
fn test_slots_are_independent() {
    let (_temp_file, mut db) = create_test_db();
    db.save_payload(Slot::Current, &sample_payload(2)).unwrap();

    let current = db.load_payload(Slot::Current).unwrap().unwrap();
    assert_eq!(current.settings.max_active_goals, 2);
    assert!(db.load_payload(Slot::SyncBase).unwrap().is_none());

    db.save_payload(Slot::Current, &sample_payload(5)).unwrap();
    let current = db.load_payload(Slot::Current).unwrap().unwrap();
    assert_eq!(current.settings.max_active_goals, 5);
}

#[test]
fn test_save_to_several_slots() {
    let (temp_file, mut db) = create_test_db();
    let payload = sample_payload(4);
    db.save_payload_to(&[Slot::Current, Slot::SyncBase], &payload)
        .unwrap();
    drop(db);

    let db = Database::new(temp_file.path()).unwrap();
    assert_eq!(db.load_payload(Slot::Current).unwrap(), Some(payload.clone()));
    assert_eq!(db.load_payload(Slot::SyncBase).unwrap(), Some(payload));
}
