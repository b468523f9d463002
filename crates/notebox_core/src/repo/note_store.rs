//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the single connection backing the `notes` table. The connection is
//!   never handed out, so every write goes through the sync engine.
//! - Execute raw note statements; no business rules live here.
//!
//! # Invariants
//! - `query_all` always orders by `done ASC, id ASC`.
//! - Each mutation runs in its own transaction: committed on success, rolled
//!   back when any statement fails.
//! - Mutations on an unknown id succeed and report `false`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{ensure_schema, open_db, open_db_in_memory, DbError};
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    details,
    done
FROM notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage fault raised by note store operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw statement surface over the `notes` table.
pub trait NoteStore {
    /// Returns every note ordered by `(done, id)`.
    fn query_all(&self) -> StoreResult<Vec<Note>>;
    /// Gets one note by id.
    fn get(&self, id: NoteId) -> StoreResult<Option<Note>>;
    /// Returns the number of persisted notes.
    fn count(&self) -> StoreResult<u64>;
    /// Inserts a not-done note and returns its assigned id.
    fn insert(&mut self, title: &str, details: Option<&str>) -> StoreResult<NoteId>;
    /// Replaces title and details; `done` is left alone.
    fn update(&mut self, id: NoteId, title: &str, details: Option<&str>) -> StoreResult<bool>;
    /// Flips `done` between 0 and 1.
    fn toggle_done(&mut self, id: NoteId) -> StoreResult<bool>;
    /// Removes the row permanently.
    fn delete(&mut self, id: NoteId) -> StoreResult<bool>;
}

/// SQLite-backed note store. Owns its connection for the whole lifetime.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Wraps an existing connection, ensuring the schema first.
    ///
    /// Fails when the `notes` table exists but lacks a required column.
    pub fn try_new(mut conn: Connection) -> StoreResult<Self> {
        ensure_schema(&mut conn)?;
        ensure_notes_table_ready(&conn)?;
        Ok(Self { conn })
    }

    fn in_transaction<T>(
        &mut self,
        f: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    ) -> StoreResult<T> {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

impl NoteStore for SqliteNoteStore {
    fn query_all(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY done ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative row count `{count}`")))
    }

    fn insert(&mut self, title: &str, details: Option<&str>) -> StoreResult<NoteId> {
        self.in_transaction(|tx| {
            tx.execute(
                "INSERT INTO notes (done, title, details) VALUES (0, ?1, ?2);",
                params![title, details],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn update(&mut self, id: NoteId, title: &str, details: Option<&str>) -> StoreResult<bool> {
        self.in_transaction(|tx| {
            let changed = tx.execute(
                "UPDATE notes SET title = ?2, details = ?3 WHERE id = ?1;",
                params![id, title, details],
            )?;
            Ok(changed > 0)
        })
    }

    fn toggle_done(&mut self, id: NoteId) -> StoreResult<bool> {
        self.in_transaction(|tx| {
            let changed = tx.execute(
                "UPDATE notes
                 SET done = (CASE WHEN done = 1 THEN 0 ELSE 1 END)
                 WHERE id = ?1;",
                [id],
            )?;
            Ok(changed > 0)
        })
    }

    fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        self.in_transaction(|tx| {
            let changed = tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
            Ok(changed > 0)
        })
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let id: NoteId = row.get("id")?;
    let done = match row.get::<_, Option<i64>>("done")? {
        Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(StoreError::InvalidData(format!(
                "invalid done value `{other}` in notes.done for id {id}"
            )));
        }
        None => {
            return Err(StoreError::InvalidData(format!(
                "null done value in notes.done for id {id}"
            )));
        }
    };

    Ok(Note {
        id,
        // Rows written by older clients may carry a NULL title.
        title: row.get::<_, Option<String>>("title")?.unwrap_or_default(),
        details: row.get("details")?,
        done,
    })
}

fn ensure_notes_table_ready(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(StoreError::MissingRequiredTable("notes"));
    }

    for column in ["id", "title", "details", "done"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
