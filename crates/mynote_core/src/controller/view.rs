//! List view contract implemented by the host UI.

use crate::model::note::Note;

/// User-facing informational message emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
    Deleted,
    /// The load finished without any note.
    NoData,
    /// The load failed; carries a display-safe reason.
    LoadFailed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Added => "One note added.".to_string(),
            Self::Updated => "One note updated.".to_string(),
            Self::Deleted => "One note deleted.".to_string(),
            Self::NoData => "No notes yet.".to_string(),
            Self::LoadFailed(reason) => format!("Could not load notes: {reason}"),
        }
    }
}

/// Rendering side of the note list.
///
/// Calls always happen on the controller's own context.
pub trait NoteListView {
    fn set_busy(&mut self, busy: bool);
    /// Replaces everything currently shown.
    fn show_notes(&mut self, notes: &[Note]);
    fn item_inserted(&mut self, position: usize, note: &Note);
    fn item_changed(&mut self, position: usize, note: &Note);
    fn item_removed(&mut self, position: usize);
    fn scroll_to(&mut self, position: usize);
    fn notify(&mut self, notice: Notice);
}

/// One call received by a `RecordingView`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Busy(bool),
    Shown(Vec<Note>),
    Inserted(usize),
    Changed(usize),
    Removed(usize),
    ScrolledTo(usize),
    Notified(Notice),
}

/// View that records every call, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Drains recorded events.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Notified(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }
}

impl NoteListView for RecordingView {
    fn set_busy(&mut self, busy: bool) {
        self.events.push(ViewEvent::Busy(busy));
    }

    fn show_notes(&mut self, notes: &[Note]) {
        self.events.push(ViewEvent::Shown(notes.to_vec()));
    }

    fn item_inserted(&mut self, position: usize, _note: &Note) {
        self.events.push(ViewEvent::Inserted(position));
    }

    fn item_changed(&mut self, position: usize, _note: &Note) {
        self.events.push(ViewEvent::Changed(position));
    }

    fn item_removed(&mut self, position: usize) {
        self.events.push(ViewEvent::Removed(position));
    }

    fn scroll_to(&mut self, position: usize) {
        self.events.push(ViewEvent::ScrolledTo(position));
    }

    fn notify(&mut self, notice: Notice) {
        self.events.push(ViewEvent::Notified(notice));
    }
}
