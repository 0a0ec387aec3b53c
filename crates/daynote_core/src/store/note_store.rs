//! Note store: the single owner of the note collection.
//!
//! # Responsibility
//! - Provide the command surface: create, delete, toggle, edit, status
//!   change, reorder.
//! - Keep the ordered collection, id allocation and productivity counters
//!   consistent under every command.
//! - Persist snapshots through the gateway after each mutation.
//!
//! # Invariants
//! - Exactly one note per id; ids are strictly increasing.
//! - The collection order is a total order; filtering never permutes it.
//! - `completed_at` is set exactly when `completed` is true.
//! - Counters are adjusted before persistence so a snapshot never splits a
//!   command in half.

use crate::model::note::{Note, NoteFilter, NoteId, NoteStatus, ValidationError};
use crate::model::productivity::ProductivityData;
use crate::parse::annotations::parse_annotations;
use crate::repo::snapshot_repo::{SnapshotStore, StorageError, NOTES_KEY, PRODUCTIVITY_KEY};
use crate::store::productivity::ProductivityTracker;
use chrono::{DateTime, Datelike, Local};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Command failure for note store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected at the boundary; no state was mutated.
    Validation(ValidationError),
    /// Command referenced an unknown note id; no state was mutated.
    NotFound(NoteId),
    /// Snapshot encoding failed.
    Encode(serde_json::Error),
    /// Persistence-layer failure after the in-memory mutation.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Plain-data outcome of a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Completion state after the toggle.
    pub completed: bool,
    /// Celebration signal: an important note was just completed. Consumed
    /// externally; carries no payload beyond "fire".
    pub celebrate: bool,
}

/// Headline counts for the stat tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub total: usize,
    pub completed: usize,
    pub important: usize,
}

/// Owner of the ordered note collection and its productivity counters.
///
/// All mutations run to completion, including persistence, before the next
/// command; the public surface is non-reentrant by construction (`&mut self`).
/// Every command has a `*_at` variant taking an explicit reference time; the
/// convenience form passes `Local::now()`.
pub struct NoteStore<S: SnapshotStore> {
    snapshots: S,
    notes: Vec<Note>,
    tracker: ProductivityTracker,
    last_id: NoteId,
}

impl<S: SnapshotStore> NoteStore<S> {
    /// Loads the store from persisted snapshots.
    ///
    /// Load-or-default: an absent, unreadable or inconsistent snapshot
    /// degrades to an empty collection / all-zero counters with a logged
    /// warning. The system must stay usable with a cold store.
    pub fn load(snapshots: S) -> Self {
        let notes = load_notes(&snapshots);
        let data = load_productivity(&snapshots);
        let last_id = notes.iter().map(|note| note.id).max().unwrap_or(0);
        info!(
            "event=store_load module=store status=ok notes={} last_id={last_id}",
            notes.len()
        );
        Self {
            snapshots,
            notes,
            tracker: ProductivityTracker::new(data),
            last_id,
        }
    }

    /// Creates a note from raw text, newest first.
    pub fn create(&mut self, raw_text: &str) -> StoreResult<&Note> {
        self.create_at(raw_text, Local::now())
    }

    /// Deterministic variant of [`NoteStore::create`].
    pub fn create_at(&mut self, raw_text: &str, now: DateTime<Local>) -> StoreResult<&Note> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let parsed = parse_annotations(trimmed, now);
        let id = self.allocate_id(now);
        let note = Note::new(
            id,
            parsed.text,
            parsed.important,
            parsed.priority,
            parsed.due_date,
            now,
        );
        self.notes.insert(0, note);
        self.tracker.record_created(now.weekday());

        self.persist_notes()?;
        self.persist_productivity()?;
        info!(
            "event=note_created module=store status=ok id={id} important={} priority={} due={}",
            self.notes[0].important,
            self.notes[0].priority.as_str(),
            self.notes[0].due_date.is_some()
        );
        Ok(&self.notes[0])
    }

    /// Removes a note. Absent ids are a no-op, not an error.
    ///
    /// Counters recorded for the note are deliberately not reversed.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return Ok(false);
        }
        self.persist_notes()?;
        info!("event=note_deleted module=store status=ok id={id}");
        Ok(true)
    }

    /// Flips the completion checkbox of a note.
    pub fn toggle_completion(&mut self, id: NoteId) -> StoreResult<ToggleOutcome> {
        self.toggle_completion_at(id, Local::now())
    }

    /// Deterministic variant of [`NoteStore::toggle_completion`].
    ///
    /// Completion counts against `now`'s weekday bucket. Undo counts against
    /// the weekday of the original `completed_at`, which assumes local
    /// calendar semantics are stable between the two events.
    pub fn toggle_completion_at(
        &mut self,
        id: NoteId,
        now: DateTime<Local>,
    ) -> StoreResult<ToggleOutcome> {
        let position = self.position(id).ok_or(StoreError::NotFound(id))?;

        let (completed, celebrate, undo_day) = {
            let note = &mut self.notes[position];
            if note.completed {
                note.completed = false;
                let previous = note.completed_at.take();
                (false, false, previous.map(|at| at.weekday()))
            } else {
                note.completed = true;
                note.completed_at = Some(now);
                (true, note.important, None)
            }
        };

        if completed {
            self.tracker.record_completed(now.weekday());
        } else if let Some(day) = undo_day {
            self.tracker.undo_completed(day);
        } else {
            warn!(
                "event=completion_undo module=store status=skipped id={id} reason=missing_completed_at"
            );
        }

        self.persist_notes()?;
        self.persist_productivity()?;
        info!(
            "event=completion_toggled module=store status=ok id={id} completed={completed} celebrate={celebrate}"
        );
        Ok(ToggleOutcome {
            completed,
            celebrate,
        })
    }

    /// Replaces a note's text, re-deriving its annotations.
    ///
    /// Returns `Ok(false)` without mutating when the trimmed text equals the
    /// stored text. `completed`, `status`, `created_at` and `completed_at`
    /// are never touched by an edit.
    pub fn edit(&mut self, id: NoteId, new_text: &str) -> StoreResult<bool> {
        self.edit_at(id, new_text, Local::now())
    }

    /// Deterministic variant of [`NoteStore::edit`].
    pub fn edit_at(
        &mut self,
        id: NoteId,
        new_text: &str,
        now: DateTime<Local>,
    ) -> StoreResult<bool> {
        let position = self.position(id).ok_or(StoreError::NotFound(id))?;
        let trimmed = new_text.trim();
        if trimmed == self.notes[position].text {
            return Ok(false);
        }
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let parsed = parse_annotations(trimmed, now);
        {
            let note = &mut self.notes[position];
            note.text = parsed.text;
            note.important = parsed.important;
            note.priority = parsed.priority;
            note.due_date = parsed.due_date;
        }

        self.persist_notes()?;
        info!("event=note_edited module=store status=ok id={id}");
        Ok(true)
    }

    /// Moves a note to a workflow column. Independent of `completed`.
    pub fn change_status(&mut self, id: NoteId, status: NoteStatus) -> StoreResult<()> {
        let position = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.notes[position].status = status;
        self.persist_notes()?;
        info!(
            "event=status_changed module=store status=ok id={id} to={}",
            status.as_str()
        );
        Ok(())
    }

    /// Applies a post-gesture arrangement as a prefix order.
    ///
    /// Notes named by `ids` come first in that order (unknown ids skipped);
    /// every unmentioned note follows in its prior relative order, so notes
    /// hidden by an active filter are never lost or shuffled.
    pub fn reorder(&mut self, ids: &[NoteId]) -> StoreResult<()> {
        let mut reordered = Vec::with_capacity(self.notes.len());
        for &id in ids {
            if let Some(position) = self.notes.iter().position(|note| note.id == id) {
                reordered.push(self.notes.remove(position));
            }
        }
        reordered.append(&mut self.notes);
        self.notes = reordered;

        self.persist_notes()?;
        info!(
            "event=notes_reordered module=store status=ok prefix={} total={}",
            ids.len(),
            self.notes.len()
        );
        Ok(())
    }

    /// Returns the ordered collection restricted by `filter`.
    ///
    /// The store order is authoritative; this never re-sorts.
    pub fn list(&self, filter: NoteFilter) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| filter.matches(note))
            .collect()
    }

    /// Looks up one note by id.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Headline counts for the stat tiles.
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            total: self.notes.len(),
            completed: self.notes.iter().filter(|note| note.completed).count(),
            important: self.notes.iter().filter(|note| note.important).count(),
        }
    }

    /// Current productivity counters (Sun..Sat) for chart rendering.
    pub fn productivity(&self) -> &ProductivityData {
        self.tracker.snapshot()
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    /// Allocates the next id from the creation timestamp.
    ///
    /// Bumps past the last issued id so creations within one millisecond
    /// still get unique, strictly increasing ids.
    fn allocate_id(&mut self, now: DateTime<Local>) -> NoteId {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn persist_notes(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.notes)?;
        self.snapshots.save(NOTES_KEY, &blob)?;
        Ok(())
    }

    fn persist_productivity(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(self.tracker.snapshot())?;
        self.snapshots.save(PRODUCTIVITY_KEY, &blob)?;
        Ok(())
    }
}

fn load_notes<S: SnapshotStore>(snapshots: &S) -> Vec<Note> {
    let blob = match snapshots.load(NOTES_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=snapshot_load module=store status=error key=notes error={err}");
            return Vec::new();
        }
    };

    let notes: Vec<Note> = match serde_json::from_str(&blob) {
        Ok(notes) => notes,
        Err(err) => {
            warn!("event=snapshot_decode module=store status=error key=notes error={err}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let consistent = notes
        .iter()
        .all(|note| note.is_consistent() && seen.insert(note.id));
    if !consistent {
        warn!("event=snapshot_decode module=store status=rejected key=notes reason=invariant");
        return Vec::new();
    }
    notes
}

fn load_productivity<S: SnapshotStore>(snapshots: &S) -> ProductivityData {
    let blob = match snapshots.load(PRODUCTIVITY_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return ProductivityData::default(),
        Err(err) => {
            warn!("event=snapshot_load module=store status=error key=productivity error={err}");
            return ProductivityData::default();
        }
    };

    match serde_json::from_str(&blob) {
        Ok(data) => data,
        Err(err) => {
            warn!("event=snapshot_decode module=store status=error key=productivity error={err}");
            ProductivityData::default()
        }
    }
}
