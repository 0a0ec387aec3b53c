//! Persistence gateway abstractions and SQLite implementation.
//!
//! # Responsibility
//! - Define the opaque blob-store contract the core persists through.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - The gateway stores whole serialized snapshots under named keys; it
//!   never interprets their contents.

pub mod snapshot_repo;
