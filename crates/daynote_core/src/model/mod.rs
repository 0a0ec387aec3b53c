//! Domain model for the task-tracking core.
//!
//! # Responsibility
//! - Define the canonical note record and its enum-typed attributes.
//! - Define the weekday productivity counters.
//! - Reject unrecognized boundary strings with `ValidationError`.
//!
//! # Invariants
//! - Every note is identified by a strictly increasing integer `NoteId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod note;
pub mod productivity;
