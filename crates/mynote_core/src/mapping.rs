//! Result-set to note mapping.
//!
//! # Responsibility
//! - Convert a forward-only `rusqlite::Rows` cursor into ordered `Note`s.
//!
//! # Invariants
//! - Output order equals cursor order; fields are copied verbatim.
//! - A cursor lacking any note column fails as a whole, never partially.

use crate::model::note::Note;
use rusqlite::{Row, Rows, Statement};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const COLUMN_ID: &str = "_id";
pub const COLUMN_TITLE: &str = "title";
pub const COLUMN_DESCRIPTION: &str = "description";
pub const COLUMN_DATE: &str = "date";

pub type MappingResult<T> = Result<T, MappingError>;

#[derive(Debug)]
pub enum MappingError {
    /// The result set does not expose a required note column.
    MissingColumn(&'static str),
    /// Cursor stepping or value conversion failed.
    Sqlite(rusqlite::Error),
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn(column) => {
                write!(f, "result set is missing required column `{column}`")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingColumn(_) => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for MappingError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Column positions of the four note fields within one statement.
#[derive(Debug, Clone, Copy)]
struct NoteColumns {
    id: usize,
    title: usize,
    description: usize,
    date: usize,
}

impl NoteColumns {
    fn resolve(stmt: &Statement<'_>) -> MappingResult<Self> {
        let index_of = |column: &'static str| {
            stmt.column_index(column)
                .map_err(|_| MappingError::MissingColumn(column))
        };

        Ok(Self {
            id: index_of(COLUMN_ID)?,
            title: index_of(COLUMN_TITLE)?,
            description: index_of(COLUMN_DESCRIPTION)?,
            date: index_of(COLUMN_DATE)?,
        })
    }

    fn read(&self, row: &Row<'_>) -> MappingResult<Note> {
        Ok(Note {
            id: row.get(self.id)?,
            title: row.get(self.title)?,
            description: row.get(self.description)?,
            date: row.get(self.date)?,
        })
    }
}

/// Maps every remaining row of `rows` into a `Note`.
///
/// `None` stands for "no result set" and yields an empty list.
pub fn map_rows(rows: Option<Rows<'_>>) -> MappingResult<Vec<Note>> {
    let Some(mut rows) = rows else {
        return Ok(Vec::new());
    };
    let columns = match rows.as_ref() {
        Some(stmt) => NoteColumns::resolve(stmt)?,
        None => return Ok(Vec::new()),
    };

    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(columns.read(row)?);
    }
    Ok(notes)
}
