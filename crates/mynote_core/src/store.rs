//! Storage handle factory injected into the note list controller.
//!
//! # Responsibility
//! - Open a short-lived storage handle per load.
//! - Run the "query all" read against that handle and close it.
//!
//! # Invariants
//! - Handles are `Send` so they can be used on a blocking worker thread.
//! - A handle is opened and closed once per load; no pooling.

use crate::db::open_db;
use crate::model::note::Note;
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
use log::{info, warn};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// One open storage session.
pub trait NoteHandle: Send {
    /// Reads all notes through the row mapper.
    fn query_all(&mut self) -> RepoResult<Vec<Note>>;
    /// Releases the underlying storage resources.
    fn close(self: Box<Self>) -> RepoResult<()>;
}

/// Factory for storage handles.
pub trait NoteSource: Send + Sync + 'static {
    fn open(&self) -> RepoResult<Box<dyn NoteHandle>>;
}

/// Opens the note database file at a fixed path on every `open`.
#[derive(Debug, Clone)]
pub struct SqliteNoteSource {
    path: PathBuf,
}

impl SqliteNoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteSource for SqliteNoteSource {
    fn open(&self) -> RepoResult<Box<dyn NoteHandle>> {
        let conn = open_db(&self.path)?;
        Ok(Box::new(SqliteNoteHandle { conn }))
    }
}

/// Source with no storage behind it.
///
/// Backs controllers that only restore snapshots and apply edit results;
/// every `open` fails with `RepoError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSource;

impl NoteSource for DetachedSource {
    fn open(&self) -> RepoResult<Box<dyn NoteHandle>> {
        Err(RepoError::Unavailable)
    }
}

struct SqliteNoteHandle {
    conn: Connection,
}

impl NoteHandle for SqliteNoteHandle {
    fn query_all(&mut self) -> RepoResult<Vec<Note>> {
        SqliteNoteRepository::new(&self.conn).query_all()
    }

    fn close(self: Box<Self>) -> RepoResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=store status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                warn!("event=db_close module=store status=error error={err}");
                Err(RepoError::from(err))
            }
        }
    }
}

/// Opens a handle, reads all notes and closes the handle.
///
/// The handle is closed even when the query fails; the query error wins
/// over a close error.
pub fn fetch_all<S: NoteSource + ?Sized>(source: &S) -> RepoResult<Vec<Note>> {
    let mut handle = source.open()?;
    let queried = handle.query_all();
    let closed = handle.close();
    let notes = queried?;
    closed?;
    Ok(notes)
}
