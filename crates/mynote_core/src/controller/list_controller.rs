//! Lifecycle-driven note list controller.
//!
//! # Responsibility
//! - Load all notes off the caller's context and publish them to the view.
//! - Restore the list from a saved snapshot without touching storage.
//! - Apply add/update/delete results from the edit screen in memory.
//!
//! # Invariants
//! - The busy indicator is shown for exactly the duration of a fetch.
//! - A failed load keeps the previously published list.
//! - Positional results outside the list are rejected without side effects.

use super::screen_result::ScreenResult;
use super::view::{NoteListView, Notice};
use crate::model::note::Note;
use crate::model::note_list::{NoteList, SavedState};
use crate::repo::note_repo::RepoError;
use crate::store::{fetch_all, NoteSource};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug)]
pub enum ControllerError {
    /// Opening, querying or closing storage failed.
    Storage(RepoError),
    /// The blocking fetch task panicked or was cancelled.
    Background(String),
    /// An edit-screen result referenced a position the list does not have.
    PositionOutOfRange { position: usize, len: usize },
}

impl ControllerError {
    /// Whether storage returned rows without the expected note columns.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::Storage(err) if err.is_schema_violation())
    }
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Background(details) => write!(f, "background fetch failed: {details}"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "position {position} is out of range for {len} notes")
            }
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Where the list currently stands with respect to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded or restored yet.
    Idle,
    Loading,
    /// The list holds `count` notes from a load or a restore.
    Ready { count: usize },
    Failed(String),
}

/// Owns the note list shown by one list screen.
pub struct NoteListController<S: NoteSource + ?Sized, V: NoteListView> {
    source: Arc<S>,
    view: V,
    notes: NoteList,
    load_state: LoadState,
}

impl<S: NoteSource + ?Sized, V: NoteListView> NoteListController<S, V> {
    pub fn new(source: Arc<S>, view: V) -> Self {
        Self {
            source,
            view,
            notes: NoteList::new(),
            load_state: LoadState::Idle,
        }
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Starts the screen: restores `saved` when present, loads otherwise.
    pub async fn initialize(&mut self, saved: Option<SavedState>) -> ControllerResult<()> {
        match saved {
            Some(state) => {
                self.restore(state);
                Ok(())
            }
            None => self.load_all().await.map(|_| ()),
        }
    }

    /// Loads every note from storage and publishes the result.
    ///
    /// Returns the number of published notes. An empty result is not an
    /// error; it publishes an empty list and emits `Notice::NoData`.
    ///
    /// # Errors
    /// - `Storage` when opening, querying or mapping fails.
    /// - `Background` when the blocking task does not complete.
    pub async fn load_all(&mut self) -> ControllerResult<usize> {
        let started_at = Instant::now();
        info!("event=notes_load module=controller status=start");
        self.load_state = LoadState::Loading;
        self.view.set_busy(true);

        let source = Arc::clone(&self.source);
        let fetched = tokio::task::spawn_blocking(move || fetch_all(source.as_ref())).await;
        self.view.set_busy(false);

        let result = match fetched {
            Ok(result) => result.map_err(ControllerError::from),
            Err(err) => Err(ControllerError::Background(err.to_string())),
        };

        match result {
            Ok(notes) => {
                let count = notes.len();
                self.publish(notes);
                if count == 0 {
                    self.view.notify(Notice::NoData);
                }
                self.load_state = LoadState::Ready { count };
                info!(
                    "event=notes_load module=controller status=ok count={count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(count)
            }
            Err(err) => {
                error!(
                    "event=notes_load module=controller status=error schema_violation={} duration_ms={} error={err}",
                    err.is_schema_violation(),
                    started_at.elapsed().as_millis()
                );
                let reason = err.to_string();
                self.load_state = LoadState::Failed(reason.clone());
                self.view.notify(Notice::LoadFailed(reason));
                Err(err)
            }
        }
    }

    /// Applies one edit-screen result to the list.
    pub fn handle_result(&mut self, result: ScreenResult) -> ControllerResult<()> {
        match result {
            ScreenResult::Added { note } => {
                self.handle_add_result(note);
                Ok(())
            }
            ScreenResult::Updated { note, position } => {
                self.handle_update_result(note, position)
            }
            ScreenResult::Deleted { position } => self.handle_delete_result(position).map(|_| ()),
        }
    }

    /// Appends `note`, scrolls to it and returns its position.
    pub fn handle_add_result(&mut self, note: Note) -> usize {
        let position = self.notes.push(note);
        self.view
            .item_inserted(position, &self.notes.as_slice()[position]);
        self.view.scroll_to(position);
        self.view.notify(Notice::Added);
        self.sync_ready_count();
        position
    }

    /// Replaces the note at `position` and scrolls to it.
    pub fn handle_update_result(&mut self, note: Note, position: usize) -> ControllerResult<()> {
        let len = self.notes.len();
        if self.notes.replace_at(position, note).is_none() {
            warn!(
                "event=note_update module=controller status=rejected position={position} len={len}"
            );
            return Err(ControllerError::PositionOutOfRange { position, len });
        }

        self.view
            .item_changed(position, &self.notes.as_slice()[position]);
        self.view.scroll_to(position);
        self.view.notify(Notice::Updated);
        Ok(())
    }

    /// Removes and returns the note at `position`.
    pub fn handle_delete_result(&mut self, position: usize) -> ControllerResult<Note> {
        let len = self.notes.len();
        let removed = self.notes.remove_at(position).ok_or_else(|| {
            warn!(
                "event=note_delete module=controller status=rejected position={position} len={len}"
            );
            ControllerError::PositionOutOfRange { position, len }
        })?;

        self.view.item_removed(position);
        self.view.notify(Notice::Deleted);
        self.sync_ready_count();
        Ok(removed)
    }

    /// Snapshots the current list for later `initialize`.
    pub fn save_state(&self) -> SavedState {
        self.notes.to_saved_state()
    }

    /// Replaces the list with a saved snapshot without touching storage.
    pub fn restore(&mut self, state: SavedState) {
        let count = state.notes.len();
        self.publish(state.notes);
        self.load_state = LoadState::Ready { count };
        info!("event=notes_restore module=controller status=ok count={count}");
    }

    fn publish(&mut self, notes: Vec<Note>) {
        self.notes.replace_all(notes);
        self.view.show_notes(self.notes.as_slice());
    }

    fn sync_ready_count(&mut self) {
        if let LoadState::Ready { count } = &mut self.load_state {
            *count = self.notes.len();
        }
    }
}
