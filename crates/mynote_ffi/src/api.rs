//! FFI use-case API for the note list screen.
//!
//! # Responsibility
//! - Expose list-screen lifecycle calls to the host UI via FRB.
//! - Carry list state across calls as a saved-state JSON string.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every list response carries the saved state the host should keep.
//! - A failed call echoes the caller's saved state unchanged.

use mynote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, DetachedSource, Note, NoteListController, NoteSource, RecordingView, SavedState,
    ScreenResult, SqliteNoteSource, ViewEvent,
};
use std::sync::{Arc, OnceLock};

static CORE_CONFIG: OnceLock<CoreConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One note row as shown by the host list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
}

impl From<Note> for NoteItem {
    fn from(value: Note) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            date: value.date,
        }
    }
}

impl From<NoteItem> for Note {
    fn from(value: NoteItem) -> Self {
        Note::new(value.id, value.title, value.description, value.date)
    }
}

/// Outcome of the add/update screen, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenResultInput {
    Added { note: NoteItem },
    Updated { note: NoteItem, position: u32 },
    Deleted { position: u32 },
}

impl From<ScreenResultInput> for ScreenResult {
    fn from(value: ScreenResultInput) -> Self {
        match value {
            ScreenResultInput::Added { note } => ScreenResult::Added { note: note.into() },
            ScreenResultInput::Updated { note, position } => ScreenResult::Updated {
                note: note.into(),
                position: position as usize,
            },
            ScreenResultInput::Deleted { position } => ScreenResult::Deleted {
                position: position as usize,
            },
        }
    }
}

/// List-screen response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScreenResponse {
    /// Whether the requested operation succeeded.
    pub ok: bool,
    /// Notes to render, in list order.
    pub items: Vec<NoteItem>,
    /// User-facing notices, in emission order.
    pub notices: Vec<String>,
    /// Position the list should scroll to, if any.
    pub scroll_to: Option<u32>,
    /// Opaque state to pass back into `list_screen_apply`/`list_screen_init`.
    pub saved_state: String,
    /// Diagnostic message; empty on success.
    pub message: String,
}

/// Starts the list screen.
///
/// With `saved_state = None` all notes are loaded from the configured
/// database; otherwise the list is restored from the snapshot.
///
/// # FFI contract
/// - Sync call; blocks until the load finishes.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_screen_init(saved_state: Option<String>) -> ListScreenResponse {
    match resolve_source() {
        Ok(source) => run_list_screen_init(source, saved_state),
        Err(err) => failure_response(
            format!("list_screen_init failed: {err}"),
            saved_state.unwrap_or_default(),
        ),
    }
}

/// Applies one add/update/delete result to a saved list.
///
/// # FFI contract
/// - Sync call; never reads configuration or touches storage.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_screen_apply(saved_state: String, result: ScreenResultInput) -> ListScreenResponse {
    run_list_screen_apply(saved_state, result)
}

fn run_list_screen_init<S: NoteSource + ?Sized>(
    source: Arc<S>,
    saved_state: Option<String>,
) -> ListScreenResponse {
    let saved = match saved_state.as_deref().map(SavedState::from_json).transpose() {
        Ok(saved) => saved,
        Err(err) => {
            return failure_response(
                format!("invalid saved_state: {err}"),
                saved_state.unwrap_or_default(),
            )
        }
    };
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            return failure_response(
                format!("runtime start failed: {err}"),
                saved_state.unwrap_or_default(),
            )
        }
    };

    let mut controller = NoteListController::new(source, RecordingView::new());
    let outcome = runtime.block_on(controller.initialize(saved));
    let message = match outcome {
        Ok(()) => String::new(),
        Err(err) => {
            log::warn!("event=ffi_list_init module=ffi status=error error={err}");
            format!("list_screen_init failed: {err}")
        }
    };
    into_response(controller, message, saved_state.unwrap_or_default())
}

fn run_list_screen_apply(saved_state: String, result: ScreenResultInput) -> ListScreenResponse {
    let saved = match SavedState::from_json(saved_state.as_str()) {
        Ok(saved) => saved,
        Err(err) => return failure_response(format!("invalid saved_state: {err}"), saved_state),
    };

    let mut controller = NoteListController::new(Arc::new(DetachedSource), RecordingView::new());
    controller.restore(saved);
    if let Err(err) = controller.handle_result(result.into()) {
        return failure_response(format!("list_screen_apply failed: {err}"), saved_state);
    }
    into_response(controller, String::new(), saved_state)
}

fn into_response<S: NoteSource + ?Sized>(
    controller: NoteListController<S, RecordingView>,
    message: String,
    previous_state: String,
) -> ListScreenResponse {
    let saved_state = match controller.save_state().to_json() {
        Ok(raw) => raw,
        Err(err) => {
            return failure_response(format!("saved_state encode failed: {err}"), previous_state)
        }
    };
    let items = controller
        .notes()
        .iter()
        .cloned()
        .map(NoteItem::from)
        .collect();

    let mut notices = Vec::new();
    let mut scroll_to = None;
    for event in controller.into_view().take_events() {
        match event {
            ViewEvent::Notified(notice) => notices.push(notice.message()),
            ViewEvent::ScrolledTo(position) => scroll_to = u32::try_from(position).ok(),
            _ => {}
        }
    }

    ListScreenResponse {
        ok: message.is_empty(),
        items,
        notices,
        scroll_to,
        saved_state,
        message,
    }
}

/// Failure envelope that hands `saved_state` back so the host keeps its list.
///
/// `items` is filled from the echoed state when it still decodes.
fn failure_response(message: String, saved_state: String) -> ListScreenResponse {
    let items = SavedState::from_json(saved_state.as_str())
        .map(|state| state.notes.into_iter().map(NoteItem::from).collect())
        .unwrap_or_default();
    ListScreenResponse {
        ok: false,
        items,
        notices: Vec::new(),
        scroll_to: None,
        saved_state,
        message,
    }
}

fn resolve_source() -> Result<Arc<SqliteNoteSource>, String> {
    let config = match CORE_CONFIG.get() {
        Some(config) => config,
        None => {
            let loaded = CoreConfig::from_env()?;
            CORE_CONFIG.get_or_init(|| loaded)
        }
    };
    Ok(Arc::new(SqliteNoteSource::new(config.db_path.clone())))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, list_screen_apply, ping, run_list_screen_apply,
        run_list_screen_init, NoteItem, ScreenResultInput,
    };
    use mynote_core::db::open_db;
    use mynote_core::{NewNote, NoteRepository, SqliteNoteRepository, SqliteNoteSource};
    use std::path::Path;
    use std::sync::Arc;

    fn seeded_source(dir: &Path, titles: &[&str]) -> Arc<SqliteNoteSource> {
        let path = dir.join("notes.db");
        let conn = open_db(&path).expect("open db");
        let repo = SqliteNoteRepository::new(&conn);
        for title in titles {
            repo.insert(&NewNote::new(*title, "body", "2024/01/01 08:00:00"))
                .expect("seed note");
        }
        Arc::new(SqliteNoteSource::new(path))
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_log_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(error.contains("absolute"));
    }

    #[test]
    fn init_loads_notes_from_storage() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = seeded_source(dir.path(), &["first", "second"]);

        let response = run_list_screen_init(source, None);

        assert!(response.ok, "{}", response.message);
        let titles: Vec<_> = response.items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(response.notices.is_empty());
        assert!(!response.saved_state.is_empty());
    }

    #[test]
    fn init_on_empty_database_reports_no_data_notice() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = seeded_source(dir.path(), &[]);

        let response = run_list_screen_init(source, None);

        assert!(response.ok, "{}", response.message);
        assert!(response.items.is_empty());
        assert_eq!(response.notices.len(), 1);
    }

    #[test]
    fn init_rejects_malformed_saved_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = seeded_source(dir.path(), &[]);

        let response = run_list_screen_init(source, Some("{not json".to_string()));

        assert!(!response.ok);
        assert!(response.message.contains("saved_state"));
    }

    #[test]
    fn apply_add_then_delete_round_trips_saved_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = seeded_source(dir.path(), &["first"]);
        let initial = run_list_screen_init(Arc::clone(&source), None);

        let added = run_list_screen_apply(
            initial.saved_state,
            ScreenResultInput::Added {
                note: NoteItem {
                    id: 99,
                    title: "added".to_string(),
                    description: "new".to_string(),
                    date: "2024/01/02 09:00:00".to_string(),
                },
            },
        );
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.items.len(), 2);
        assert_eq!(added.scroll_to, Some(1));
        assert_eq!(added.notices.len(), 1);

        let deleted = run_list_screen_apply(
            added.saved_state,
            ScreenResultInput::Deleted { position: 0 },
        );
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.items.len(), 1);
        assert_eq!(deleted.items[0].id, 99);
    }

    #[test]
    fn apply_out_of_range_update_keeps_list() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = seeded_source(dir.path(), &["only"]);
        let initial = run_list_screen_init(source, None);

        let response = run_list_screen_apply(
            initial.saved_state.clone(),
            ScreenResultInput::Updated {
                note: NoteItem {
                    id: 1,
                    title: "x".to_string(),
                    description: "x".to_string(),
                    date: "x".to_string(),
                },
                position: 4,
            },
        );

        assert!(!response.ok);
        assert!(response.message.contains("out of range"));
        assert_eq!(response.items, initial.items);
        assert_eq!(response.saved_state, initial.saved_state);
    }

    #[test]
    fn apply_ignores_unusable_environment_config() {
        let state = r#"{"notes":[{"id":1,"title":"kept","description":"d","date":"2024/01/01 08:00:00"}]}"#;
        std::env::set_var("MYNOTE_LOG_LEVEL", "loud");

        let response = list_screen_apply(
            state.to_string(),
            ScreenResultInput::Deleted { position: 0 },
        );
        std::env::remove_var("MYNOTE_LOG_LEVEL");

        assert!(response.ok, "{}", response.message);
        assert!(response.items.is_empty());
        assert_eq!(response.notices.len(), 1);
    }

    #[test]
    fn apply_failure_echoes_caller_saved_state() {
        let state = r#"{"notes":[{"id":1,"title":"kept","description":"d","date":"2024/01/01 08:00:00"}]}"#;

        let response =
            run_list_screen_apply(state.to_string(), ScreenResultInput::Deleted { position: 3 });

        assert!(!response.ok);
        assert_eq!(response.saved_state, state);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].title, "kept");
    }

    #[test]
    fn malformed_saved_state_is_echoed_back() {
        let response =
            run_list_screen_apply("{not json".to_string(), ScreenResultInput::Deleted { position: 0 });

        assert!(!response.ok);
        assert!(response.message.contains("saved_state"));
        assert_eq!(response.saved_state, "{not json");
        assert!(response.items.is_empty());
    }
}
