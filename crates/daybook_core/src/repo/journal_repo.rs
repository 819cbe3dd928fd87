//! Journal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `journal_entries` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `JournalEntry::validate()` before SQL mutations.
//! - Delete is a hard delete; a removed row is gone from every later read.
//! - The store does not enforce one entry per calendar day.

use crate::model::journal::{EntryId, JournalEntry, Mood};
use crate::model::DATE_FORMAT;
use crate::repo::task_repo::{decode_timestamp, encode_timestamp};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    entry_date,
    content,
    mood,
    created_at,
    updated_at
FROM journal_entries";

/// Query options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryListQuery {
    pub mood: Option<Mood>,
    /// Restrict to entries for this calendar date.
    pub on: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for journal CRUD operations.
pub trait JournalRepository {
    /// Inserts an entry and returns the store-assigned identifier.
    fn create_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId>;
    fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>>;
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<JournalEntry>>;
    /// Hard-deletes an entry. `EntryNotFound` when no row matched.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
}

/// SQLite-backed journal repository.
pub struct SqliteJournalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJournalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl JournalRepository for SqliteJournalRepository<'_> {
    fn create_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO journal_entries (
                entry_date,
                content,
                mood,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                entry.date.format(DATE_FORMAT).to_string(),
                entry.content.as_str(),
                entry.mood.ordinal(),
                encode_timestamp(entry.created_at),
                encode_timestamp(entry.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE journal_entries
             SET
                entry_date = ?1,
                content = ?2,
                mood = ?3,
                updated_at = ?4
             WHERE id = ?5;",
            params![
                entry.date.format(DATE_FORMAT).to_string(),
                entry.content.as_str(),
                entry.mood.ordinal(),
                encode_timestamp(entry.updated_at),
                entry.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::EntryNotFound(entry.id));
        }

        Ok(())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<JournalEntry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(mood) = query.mood {
            sql.push_str(" AND mood = ?");
            bind_values.push(Value::Integer(mood.ordinal()));
        }

        if let Some(day) = query.on {
            sql.push_str(" AND entry_date = ?");
            bind_values.push(Value::Text(day.format(DATE_FORMAT).to_string()));
        }

        sql.push_str(" ORDER BY entry_date DESC, created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::EntryNotFound(id));
        }

        Ok(())
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let mood_value: i64 = row.get("mood")?;
    let mood = Mood::from_ordinal(mood_value).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid mood value `{mood_value}` in journal_entries.mood"
        ))
    })?;

    let date_text: String = row.get("entry_date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in journal_entries.entry_date"
        ))
    })?;

    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    let entry = JournalEntry {
        id: row.get("id")?,
        date,
        content: row.get("content")?,
        mood,
        created_at: decode_timestamp(&created_at, "journal_entries.created_at")?,
        updated_at: decode_timestamp(&updated_at, "journal_entries.updated_at")?,
    };
    entry.validate()?;
    Ok(entry)
}
