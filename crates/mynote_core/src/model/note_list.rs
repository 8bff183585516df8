//! Ordered in-memory note list and its persisted snapshot.
//!
//! # Invariants
//! - Positional operations never reorder untouched entries.
//! - Out-of-range positions leave the list unchanged.

use super::note::Note;
use serde::{Deserialize, Serialize};

/// Ordered note sequence backing the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteList {
    notes: Vec<Note>,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Replaces the whole list.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Appends `note` and returns its position.
    pub fn push(&mut self, note: Note) -> usize {
        self.notes.push(note);
        self.notes.len() - 1
    }

    /// Replaces the note at `position`, returning the previous value.
    pub fn replace_at(&mut self, position: usize, note: Note) -> Option<Note> {
        self.notes
            .get_mut(position)
            .map(|slot| std::mem::replace(slot, note))
    }

    /// Removes and returns the note at `position`.
    pub fn remove_at(&mut self, position: usize) -> Option<Note> {
        (position < self.notes.len()).then(|| self.notes.remove(position))
    }

    /// Snapshots the list for later restoration.
    pub fn to_saved_state(&self) -> SavedState {
        SavedState {
            notes: self.notes.clone(),
        }
    }
}

impl From<SavedState> for NoteList {
    fn from(value: SavedState) -> Self {
        Self { notes: value.notes }
    }
}

/// Verbatim snapshot of the list kept across screen recreation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub notes: Vec<Note>,
}

impl SavedState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteList, SavedState};
    use crate::model::note::Note;

    fn sample() -> NoteList {
        let mut list = NoteList::new();
        list.push(Note::new(1, "A", "d1", "2023-01-01"));
        list.push(Note::new(2, "B", "d2", "2023-01-02"));
        list
    }

    #[test]
    fn out_of_range_positions_leave_list_unchanged() {
        let mut list = sample();
        assert!(list
            .replace_at(2, Note::new(9, "X", "x", "x"))
            .is_none());
        assert!(list.remove_at(5).is_none());
        assert_eq!(list, sample());
    }

    #[test]
    fn saved_state_json_keeps_order_and_fields() {
        let list = sample();
        let raw = list.to_saved_state().to_json().expect("serialize state");
        let restored = NoteList::from(SavedState::from_json(&raw).expect("parse state"));
        assert_eq!(restored, list);
    }

    #[test]
    fn remove_at_shifts_following_entries() {
        let mut list = sample();
        let removed = list.remove_at(0).expect("position 0 exists");
        assert_eq!(removed.id, 1);
        assert_eq!(list.as_slice()[0].id, 2);
    }
}
