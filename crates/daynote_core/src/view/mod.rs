//! Read-only presentation projections.
//!
//! # Responsibility
//! - Derive the kanban partition and progressive-reveal pagination from
//!   store list output.
//!
//! # Invariants
//! - Projections never mutate or re-sort; the store order is authoritative.

pub mod projector;
