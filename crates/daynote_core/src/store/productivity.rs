//! Productivity counter tracking.
//!
//! # Responsibility
//! - Apply creation/completion lifecycle events to weekday buckets.
//! - Expose the counter arrays for chart projection.
//!
//! # Invariants
//! - Each lifecycle event adjusts exactly one bucket by exactly one.
//! - Undo clamps at zero and logs instead of underflowing.

use crate::model::productivity::{day_index, ProductivityData};
use chrono::Weekday;
use log::warn;

/// Stateful facade over the persisted weekday counters.
///
/// Owned by the note store, which persists the snapshot after every
/// mutation.
#[derive(Debug, Default)]
pub struct ProductivityTracker {
    data: ProductivityData,
}

impl ProductivityTracker {
    /// Wraps counters loaded from a snapshot.
    pub fn new(data: ProductivityData) -> Self {
        Self { data }
    }

    /// Records a note creation on the given weekday.
    pub fn record_created(&mut self, day: Weekday) {
        self.data.created_per_day[day_index(day)] += 1;
    }

    /// Records a note completion on the given weekday.
    pub fn record_completed(&mut self, day: Weekday) {
        self.data.completed_per_day[day_index(day)] += 1;
    }

    /// Reverses one completion recorded on the given weekday.
    ///
    /// The caller passes the weekday of the original completion, not today.
    pub fn undo_completed(&mut self, day: Weekday) {
        let slot = &mut self.data.completed_per_day[day_index(day)];
        if *slot == 0 {
            warn!(
                "event=stats_underflow module=stats status=clamped day_index={}",
                day_index(day)
            );
            return;
        }
        *slot -= 1;
    }

    /// Returns the current counter arrays.
    pub fn snapshot(&self) -> &ProductivityData {
        &self.data
    }
}
