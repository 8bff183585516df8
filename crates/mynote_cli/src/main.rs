//! Command-line access to a MyNote database.
//!
//! `list` goes through the same list controller a host screen uses, so the
//! output matches what the screen would render.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use clap::{Parser, Subcommand};
use mynote_core::db::open_db;
use mynote_core::{
    init_logging_from_config, CoreConfig, NewNote, Note, NoteId, NoteListController,
    NoteRepository, RecordingView, SqliteNoteRepository, SqliteNoteSource,
};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "mynote", version, about = "Inspect and edit a MyNote database")]
struct Cli {
    /// Database file; defaults to `MYNOTE_DB_PATH` or the temp directory.
    #[arg(long)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every note in list order.
    List,
    /// Store a new note.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Free-form date text; defaults to the current local time.
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a note by id.
    Delete { id: NoteId },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CoreConfig::from_env().map_err(anyhow::Error::msg)?;
    init_logging_from_config(&config).map_err(anyhow::Error::msg)?;
    let db_path = cli.db.unwrap_or(config.db_path);

    match cli.command {
        Command::List => {
            for line in list_notes(&db_path).await? {
                println!("{line}");
            }
        }
        Command::Add {
            title,
            description,
            date,
        } => {
            let date = date.unwrap_or_else(|| format_date(&chrono::Local::now()));
            let note = add_note(&db_path, NewNote::new(title, description, date))?;
            println!("created note id={} date={}", note.id, note.date);
        }
        Command::Delete { id } => {
            delete_note(&db_path, id)?;
            println!("deleted note id={id}");
        }
    }

    Ok(())
}

/// Renders a timestamp the way notes store their date.
fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format(DATE_FORMAT).to_string()
}

/// Loads the list through the controller; returns note rows then notices.
async fn list_notes(db_path: &Path) -> Result<Vec<String>> {
    let source = Arc::new(SqliteNoteSource::new(db_path));
    let mut controller = NoteListController::new(Arc::clone(&source), RecordingView::new());
    controller
        .load_all()
        .await
        .with_context(|| format!("failed to load notes from {}", source.path().display()))?;

    let mut lines: Vec<String> = controller
        .notes()
        .iter()
        .map(|note| format!("{}\t{}\t{}\t{}", note.id, note.date, note.title, note.description))
        .collect();
    lines.extend(
        controller
            .view()
            .notices()
            .iter()
            .map(|notice| notice.message()),
    );
    Ok(lines)
}

fn add_note(db_path: &Path, note: NewNote) -> Result<Note> {
    let conn = open_db(db_path)?;
    let id = SqliteNoteRepository::new(&conn).insert(&note)?;
    Ok(note.into_note(id))
}

fn delete_note(db_path: &Path, id: NoteId) -> Result<()> {
    let conn = open_db(db_path)?;
    SqliteNoteRepository::new(&conn)
        .delete_by_id(id)
        .with_context(|| format!("failed to delete note id={id}"))?;
    Ok(())
}
