//! Weekday productivity counters.
//!
//! # Responsibility
//! - Hold the two per-weekday counter arrays fed to chart rendering.
//! - Map calendar weekdays onto bucket indexes.
//!
//! # Invariants
//! - Buckets are indexed 0 = Sunday .. 6 = Saturday.
//! - Counters never go negative; decrements clamp at zero.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Number of weekday buckets per counter.
pub const DAYS_PER_WEEK: usize = 7;

/// Persisted creation/completion counters, one slot per weekday.
///
/// Serialized in camelCase to match the persisted snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityData {
    pub completed_per_day: [u32; DAYS_PER_WEEK],
    pub created_per_day: [u32; DAYS_PER_WEEK],
}

/// Returns the bucket index for a weekday (0 = Sunday .. 6 = Saturday).
pub fn day_index(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}
