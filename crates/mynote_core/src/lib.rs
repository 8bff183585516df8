//! Core domain logic for MyNote.
//! This crate owns the note list state, storage access and row mapping.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod repo;
pub mod store;

pub use config::CoreConfig;
pub use controller::list_controller::{
    ControllerError, ControllerResult, LoadState, NoteListController,
};
pub use controller::screen_result::ScreenResult;
pub use controller::view::{NoteListView, Notice, RecordingView, ViewEvent};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status,
};
pub use mapping::{map_rows, MappingError, MappingResult};
pub use model::note::{NewNote, Note, NoteId};
pub use model::note_list::{NoteList, SavedState};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use store::{fetch_all, DetachedSource, NoteHandle, NoteSource, SqliteNoteSource};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
