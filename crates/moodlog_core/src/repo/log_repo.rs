//! Log persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full log collection after every store mutation.
//! - Restore the collection at startup.
//!
//! # Invariants
//! - `replace_all` swaps the whole persisted collection in one transaction.
//! - Tag links keep their per-entry order through the `position` column.
//! - Draft entries (unset rating) are never persisted.

use crate::db::DbError;
use crate::model::log_entry::{LogEntry, LogValidationError};
use crate::model::tag::Tag;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error for the log collection.
#[derive(Debug)]
pub enum RepoError {
    Validation(LogValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted log data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<LogValidationError> for RepoError {
    fn from(value: LogValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence contract consumed by the store.
pub trait LogRepository {
    /// Loads every persisted entry, date-ascending.
    fn load_all(&self) -> RepoResult<Vec<LogEntry>>;
    /// Replaces the persisted collection with `entries` atomically.
    fn replace_all(&mut self, entries: &[LogEntry]) -> RepoResult<()>;
}

/// Repository that persists nothing. Used by tests and preview flows.
#[derive(Debug, Default)]
pub struct NullLogRepository;

impl LogRepository for NullLogRepository {
    fn load_all(&self) -> RepoResult<Vec<LogEntry>> {
        Ok(Vec::new())
    }

    fn replace_all(&mut self, _entries: &[LogEntry]) -> RepoResult<()> {
        Ok(())
    }
}

/// SQLite-backed log repository over a migrated connection.
pub struct SqliteLogRepository {
    conn: Connection,
}

impl SqliteLogRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl LogRepository for SqliteLogRepository {
    fn load_all(&self) -> RepoResult<Vec<LogEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, rating, message FROM logs ORDER BY date ASC;")?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            let date_text: String = row.get("date")?;
            let date = parse_date(&date_text)?;
            let rating_raw: i64 = row.get("rating")?;
            let rating = u8::try_from(rating_raw).map_err(|_| {
                RepoError::InvalidData(format!("rating {rating_raw} out of range for {date_text}"))
            })?;

            let entry = LogEntry {
                date,
                rating: Some(rating),
                message: row.get("message")?,
                tags: self.load_tags(&date_text)?,
            };
            entry.validate()?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn replace_all(&mut self, entries: &[LogEntry]) -> RepoResult<()> {
        for entry in entries {
            entry.validate()?;
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM log_tags;", [])?;
        tx.execute("DELETE FROM logs;", [])?;
        tx.execute("DELETE FROM tags;", [])?;

        for entry in entries {
            let rating = entry.rating.ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "draft entry for {} cannot be persisted",
                    entry.date_key()
                ))
            })?;

            tx.execute(
                "INSERT INTO logs (date, rating, message) VALUES (?1, ?2, ?3);",
                params![entry.date_key(), i64::from(rating), entry.message],
            )?;

            for (position, tag) in entry.tags.iter().enumerate() {
                tx.execute(
                    "INSERT OR REPLACE INTO tags (id, title, emoji) VALUES (?1, ?2, ?3);",
                    params![tag.id.to_string(), tag.title, tag.emoji],
                )?;
                tx.execute(
                    "INSERT INTO log_tags (log_date, tag_id, position) VALUES (?1, ?2, ?3);",
                    params![entry.date_key(), tag.id.to_string(), position as i64],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl SqliteLogRepository {
    fn load_tags(&self, date_key: &str) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.title, t.emoji
             FROM log_tags lt
             JOIN tags t ON t.id = lt.tag_id
             WHERE lt.log_date = ?1
             ORDER BY lt.position ASC;",
        )?;
        let mut rows = stmt.query([date_key])?;
        let mut tags = Vec::new();

        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let id = Uuid::parse_str(&id_text).map_err(|_| {
                RepoError::InvalidData(format!("invalid tag id `{id_text}` in tags.id"))
            })?;
            tags.push(Tag {
                id,
                title: row.get("title")?,
                emoji: row.get("emoji")?,
            });
        }

        Ok(tags)
    }
}

fn parse_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in logs.date")))
}
