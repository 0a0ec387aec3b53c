//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daynote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use daynote_core::db::open_db_in_memory;
use daynote_core::{NoteFilter, NoteStore, SqliteSnapshotStore};

fn main() {
    println!("daynote_core version={}", daynote_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    };
    let snapshots = match SqliteSnapshotStore::try_new(&conn) {
        Ok(snapshots) => snapshots,
        Err(err) => {
            eprintln!("snapshot gateway unavailable: {err}");
            std::process::exit(1);
        }
    };

    let mut store = NoteStore::load(snapshots);
    for raw in ["water the plants", "file taxes #important"] {
        if let Err(err) = store.create(raw) {
            eprintln!("create failed: {err}");
            std::process::exit(1);
        }
    }

    for note in store.list(NoteFilter::All) {
        println!(
            "note priority={} important={} text={}",
            note.priority.as_str(),
            note.important,
            note.text
        );
    }
}
