//! Core command services.
//!
//! # Responsibility
//! - Own all state mutations: note lifecycle, counters, timer state.
//! - Keep observers read-only; commands return plain data outcomes.
//!
//! # Invariants
//! - Public operations are synchronous, non-reentrant and persist before
//!   returning.
//! - No operation leaves notes and counters partially updated.

pub mod note_store;
pub mod productivity;
pub mod timer;
