//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the "query all" read used by the note list.
//! - Provide the insert/update/delete writes used by the edit screen.
//!
//! # Invariants
//! - `query_all` returns notes ordered by `_id ASC`.
//! - SQL details stay inside this module.

use crate::db::DbError;
use crate::mapping::{map_rows, MappingError};
use crate::model::note::{NewNote, Note, NoteId};
use log::debug;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    _id,
    title,
    description,
    date
FROM note";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Mapping(MappingError),
    NotFound(NoteId),
    /// The source was built without storage behind it.
    Unavailable,
}

impl RepoError {
    /// Whether the error comes from a result set that lacks note columns.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::Mapping(MappingError::MissingColumn(_)))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Mapping(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Unavailable => write!(f, "no storage attached"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Mapping(err) => Some(err),
            Self::NotFound(_) | Self::Unavailable => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<MappingError> for RepoError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Returns every note in id order.
    fn query_all(&self) -> RepoResult<Vec<Note>>;
    fn query_by_id(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Inserts one note and returns the id storage assigned to it.
    fn insert(&self, note: &NewNote) -> RepoResult<NoteId>;
    fn update(&self, note: &Note) -> RepoResult<()>;
    fn delete_by_id(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn query_all(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY _id ASC;"))?;
        let rows = stmt.query([])?;
        let notes = map_rows(Some(rows))?;
        debug!(
            "event=note_query_all module=repo status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    fn query_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE _id = ?1;"))?;
        let rows = stmt.query([id])?;
        Ok(map_rows(Some(rows))?.into_iter().next())
    }

    fn insert(&self, note: &NewNote) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO note (title, description, date) VALUES (?1, ?2, ?3);",
            params![
                note.title.as_str(),
                note.description.as_str(),
                note.date.as_str()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE note
             SET
                title = ?1,
                description = ?2,
                date = ?3
             WHERE _id = ?4;",
            params![
                note.title.as_str(),
                note.description.as_str(),
                note.date.as_str(),
                note.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        Ok(())
    }

    fn delete_by_id(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM note WHERE _id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}
