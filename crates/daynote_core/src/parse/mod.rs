//! Free-form text annotation parsing.
//!
//! # Responsibility
//! - Extract importance, priority and due-date metadata from raw note text.
//! - Keep the heuristic deterministic given an injected reference time.
//!
//! # Invariants
//! - Parsing never mutates external state.
//! - Stripped annotation tokens never appear in the returned text.

pub mod annotations;
