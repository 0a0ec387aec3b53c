//! View projections over store list output.
//!
//! The flat list view is `NoteStore::list` output itself; these helpers
//! shape it for the kanban board and the progressively revealed list.

use crate::model::note::{Note, NoteStatus};

/// Notes shown before the "show more" expansion.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Three ordered kanban columns, store order preserved within each.
#[derive(Debug, Default, PartialEq)]
pub struct KanbanView<'a> {
    pub todo: Vec<&'a Note>,
    pub in_progress: Vec<&'a Note>,
    pub done: Vec<&'a Note>,
}

impl<'a> KanbanView<'a> {
    /// Partitions filtered list output by workflow status.
    pub fn partition(notes: &[&'a Note]) -> Self {
        let mut view = Self::default();
        for &note in notes {
            match note.status {
                NoteStatus::Todo => view.todo.push(note),
                NoteStatus::InProgress => view.in_progress.push(note),
                NoteStatus::Done => view.done.push(note),
            }
        }
        view
    }

    /// Total notes across the three columns.
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Progressive-reveal split of a filtered list.
///
/// Purely a view concern; the stored order is unaffected.
#[derive(Debug, PartialEq)]
pub struct PageView<'a> {
    /// The first `page_size` notes.
    pub visible: Vec<&'a Note>,
    /// Everything behind the "show more" action.
    pub remaining: Vec<&'a Note>,
}

impl<'a> PageView<'a> {
    /// Splits list output into a visible prefix and the hidden rest.
    pub fn reveal(notes: &[&'a Note], page_size: usize) -> Self {
        let cut = page_size.min(notes.len());
        Self {
            visible: notes[..cut].to_vec(),
            remaining: notes[cut..].to_vec(),
        }
    }
}
