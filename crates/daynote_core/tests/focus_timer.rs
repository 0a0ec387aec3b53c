use chrono::{DateTime, Local, TimeZone};
use daynote_core::db::open_db_in_memory;
use daynote_core::{FocusTimer, NoteStore, SqliteSnapshotStore, TimerTick, DEFAULT_FOCUS_SECS};

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 4, 10, 30, 0).unwrap()
}

#[test]
fn timer_expiry_completes_the_bound_task() {
    let conn = open_db_in_memory().unwrap();
    let snapshots = SqliteSnapshotStore::try_new(&conn).unwrap();
    let mut store = NoteStore::load(snapshots);

    let id = store.create_at("deep work session", now()).unwrap().id;

    let mut timer = FocusTimer::new();
    timer.bind(id);
    timer.toggle();

    let mut expired_task = None;
    for _ in 0..DEFAULT_FOCUS_SECS {
        if let TimerTick::Expired { task } = timer.tick() {
            expired_task = task;
            break;
        }
    }

    // The driver reacts to expiry by toggling completion for the bound id.
    let bound = expired_task.unwrap();
    assert_eq!(bound, id);
    let outcome = store.toggle_completion_at(bound, now()).unwrap();
    assert!(outcome.completed);
    assert!(store.get(id).unwrap().completed);
}

#[test]
fn unbound_timer_expires_without_a_task() {
    let mut timer = FocusTimer::new();
    timer.toggle();

    let mut last = TimerTick::Idle;
    for _ in 0..DEFAULT_FOCUS_SECS {
        last = timer.tick();
    }
    assert_eq!(last, TimerTick::Expired { task: None });
    assert!(!timer.is_running());
}
