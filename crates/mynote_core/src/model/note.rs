//! Note domain record.

use serde::{Deserialize, Serialize};

/// Storage-assigned note identifier (`note._id`).
pub type NoteId = i64;

/// One persisted note as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Row id assigned on insert.
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// Free-form date text, stored verbatim.
    pub date: String,
}

impl Note {
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            date: date.into(),
        }
    }
}

/// Insert payload for a note that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub date: String,
}

impl NewNote {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: date.into(),
        }
    }

    /// Attaches the id storage assigned to this note.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
        }
    }
}
