//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical mutable note record owned by the store.
//! - Provide priority/status/filter enums with boundary parsing.
//!
//! # Invariants
//! - `id` is unique and never reused within one store.
//! - `text` never contains the annotation tokens stripped at parse time.
//! - `completed_at` is `Some` exactly when `completed` is true.
//! - `status` and `completed` are independent and never synchronized.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a note.
///
/// Allocated from the creation-time epoch millisecond timestamp, bumped past
/// the last issued id so two creations in the same millisecond never collide.
pub type NoteId = i64;

/// Boundary validation failure for user-supplied input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Note text is empty after trimming.
    EmptyText,
    /// Status string is not one of `todo`, `in-progress`, `done`.
    UnknownStatus(String),
    /// Priority string is not one of `low`, `normal`, `high`, `critical`.
    UnknownPriority(String),
    /// Filter string is not one of `all`, `active`, `completed`, `important`.
    UnknownFilter(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text cannot be empty"),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status `{value}`; expected todo|in-progress|done"
            ),
            Self::UnknownPriority(value) => write!(
                f,
                "unknown priority `{value}`; expected low|normal|high|critical"
            ),
            Self::UnknownFilter(value) => write!(
                f,
                "unknown filter `{value}`; expected all|active|completed|important"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Urgency level derived from text annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    /// Returns the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parses a boundary string, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ValidationError::UnknownPriority(value.to_string())),
        }
    }
}

/// Kanban workflow column, independent of the completion checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl NoteStatus {
    /// Returns the canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Parses a boundary string, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::UnknownStatus(value.to_string())),
        }
    }
}

/// List restriction applied by read paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteFilter {
    #[default]
    All,
    /// Not completed.
    Active,
    Completed,
    Important,
}

impl NoteFilter {
    /// Parses a boundary string, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "important" => Ok(Self::Important),
            _ => Err(ValidationError::UnknownFilter(value.to_string())),
        }
    }

    /// Returns whether `note` passes this filter.
    pub fn matches(self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Active => !note.completed,
            Self::Completed => note.completed,
            Self::Important => note.important,
        }
    }
}

/// Canonical mutable note record.
///
/// Serialized in camelCase to match the persisted snapshot shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Annotation-stripped body text.
    pub text: String,
    pub completed: bool,
    /// Derived from annotations at create/edit time; not independently settable.
    pub important: bool,
    pub due_date: Option<DateTime<Local>>,
    pub priority: Priority,
    pub status: NoteStatus,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
}

impl Note {
    /// Creates a fresh note in default workflow state.
    pub fn new(
        id: NoteId,
        text: impl Into<String>,
        important: bool,
        priority: Priority,
        due_date: Option<DateTime<Local>>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            important,
            due_date,
            priority,
            status: NoteStatus::Todo,
            created_at,
            completed_at: None,
        }
    }

    /// Checks the completion-state invariant.
    ///
    /// Used by the load path to reject corrupt snapshots instead of
    /// propagating inconsistent records into the store.
    pub fn is_consistent(&self) -> bool {
        self.completed == self.completed_at.is_some()
    }
}
