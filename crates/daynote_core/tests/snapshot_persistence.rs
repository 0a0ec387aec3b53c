use chrono::{DateTime, Local, TimeZone};
use daynote_core::db::{open_db, open_db_in_memory};
use daynote_core::{
    NoteFilter, NoteStatus, NoteStore, SnapshotStore, SqliteSnapshotStore, StorageError,
    NOTES_KEY, PRODUCTIVITY_KEY,
};
use rusqlite::Connection;

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 4, 10, 30, 0).unwrap()
}

#[test]
fn store_state_survives_a_reload() {
    let conn = open_db_in_memory().unwrap();

    let (first, second) = {
        let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
        let mut store = NoteStore::load(snapshots);
        let first = store.create_at("buy milk tomorrow at 5pm", now()).unwrap().id;
        let second = store.create_at("ship release!", now()).unwrap().id;
        store.toggle_completion_at(second, now()).unwrap();
        store.change_status(first, NoteStatus::InProgress).unwrap();
        (first, second)
    };

    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    let store = NoteStore::load(snapshots);

    let all = store.list(NoteFilter::All);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second);
    assert_eq!(all[1].id, first);
    assert!(all[0].completed);
    assert_eq!(all[0].completed_at, Some(now()));
    assert_eq!(all[1].status, NoteStatus::InProgress);
    assert_eq!(all[1].due_date, Some(Local.with_ymd_and_hms(2026, 3, 5, 17, 0, 0).unwrap()));
    assert_eq!(store.productivity().created_per_day[3], 2);
    assert_eq!(store.productivity().completed_per_day[3], 1);
}

#[test]
fn reloaded_store_keeps_allocating_increasing_ids() {
    let conn = open_db_in_memory().unwrap();

    let last = {
        let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
        let mut store = NoteStore::load(snapshots);
        store.create_at("a", now()).unwrap();
        store.create_at("b", now()).unwrap().id
    };

    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    let mut store = NoteStore::load(snapshots);
    let next = store.create_at("c", now()).unwrap().id;
    assert!(next > last);
}

#[test]
fn snapshots_use_the_camel_case_record_shapes() {
    let conn = open_db_in_memory().unwrap();

    {
        let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
        let mut store = NoteStore::load(snapshots);
        let id = store.create_at("inspect me tomorrow", now()).unwrap().id;
        store.toggle_completion_at(id, now()).unwrap();
    }

    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    let notes_blob = snapshots.load(NOTES_KEY).unwrap().unwrap();
    assert!(notes_blob.contains("\"createdAt\""));
    assert!(notes_blob.contains("\"completedAt\""));
    assert!(notes_blob.contains("\"dueDate\""));
    assert!(notes_blob.contains("\"status\":\"todo\""));

    let stats_blob = snapshots.load(PRODUCTIVITY_KEY).unwrap().unwrap();
    assert!(stats_blob.contains("\"completedPerDay\""));
    assert!(stats_blob.contains("\"createdPerDay\""));
}

#[test]
fn corrupt_blobs_degrade_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    snapshots.save(NOTES_KEY, "definitely not json").unwrap();
    snapshots.save(PRODUCTIVITY_KEY, "[1,2,3").unwrap();

    let store = NoteStore::load(snapshots);
    assert!(store.list(NoteFilter::All).is_empty());
    assert_eq!(store.productivity().created_per_day, [0; 7]);
    assert_eq!(store.productivity().completed_per_day, [0; 7]);
}

#[test]
fn inconsistent_notes_snapshot_is_rejected_as_a_whole() {
    let conn = open_db_in_memory().unwrap();
    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    // completed=true with a null completedAt violates the model invariant.
    snapshots
        .save(
            NOTES_KEY,
            r#"[{"id":1,"text":"broken","completed":true,"important":false,
                "dueDate":null,"priority":"normal","status":"todo",
                "createdAt":"2026-03-04T10:30:00+00:00","completedAt":null}]"#,
        )
        .unwrap();

    let store = NoteStore::load(snapshots);
    assert!(store.list(NoteFilter::All).is_empty());
}

#[test]
fn duplicate_ids_in_snapshot_are_rejected_as_a_whole() {
    let conn = open_db_in_memory().unwrap();
    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    snapshots
        .save(
            NOTES_KEY,
            r#"[{"id":1,"text":"a","completed":false,"important":false,
                "dueDate":null,"priority":"normal","status":"todo",
                "createdAt":"2026-03-04T10:30:00+00:00","completedAt":null},
               {"id":1,"text":"b","completed":false,"important":false,
                "dueDate":null,"priority":"normal","status":"todo",
                "createdAt":"2026-03-04T10:30:00+00:00","completedAt":null}]"#,
        )
        .unwrap();

    let store = NoteStore::load(snapshots);
    assert!(store.list(NoteFilter::All).is_empty());
}

#[test]
fn missing_records_load_as_cold_defaults() {
    let conn = open_db_in_memory().unwrap();
    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();

    let store = NoteStore::load(snapshots);
    assert!(store.list(NoteFilter::All).is_empty());
    assert_eq!(store.summary().total, 0);
    assert_eq!(store.productivity().created_per_day, [0; 7]);
}

#[test]
fn gateway_rejects_an_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let result = SqliteSnapshotStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StorageError::UninitializedConnection {
            actual_version: 0,
            ..
        })
    ));
}

#[test]
fn gateway_rejects_a_connection_without_the_snapshots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 1;").unwrap();

    let result = SqliteSnapshotStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StorageError::MissingRequiredTable("snapshots"))
    ));
}

#[test]
fn file_backed_store_round_trips_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("daynote.sqlite3");

    {
        let conn = open_db(&db_path).unwrap();
        let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
        let mut store = NoteStore::load(snapshots);
        store.create_at("persisted note", now()).unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    let store = NoteStore::load(snapshots);

    let all = store.list(NoteFilter::All);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].text, "persisted note");
}
