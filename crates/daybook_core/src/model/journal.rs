//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the diary record tied to a calendar date.
//! - Encode mood as a five-step ordinal scale.
//!
//! # Invariants
//! - One entry per day is a UI convention only; the store does not enforce
//!   uniqueness on `date`.
//! - `content` must be non-blank before any mutation is attempted.

use crate::model::current_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier for journal entries.
///
/// `0` denotes an entry that has not been persisted yet.
pub type EntryId = i64;

/// Sentiment tag on a five-step ordinal scale.
///
/// The wire/database encoding is the ordinal value, so variant order is a
/// compatibility contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Awful,
    Bad,
    Neutral,
    Good,
    Great,
}

impl Mood {
    /// Returns the stable ordinal used in storage and FFI (0..=4).
    pub fn ordinal(self) -> i64 {
        match self {
            Self::Awful => 0,
            Self::Bad => 1,
            Self::Neutral => 2,
            Self::Good => 3,
            Self::Great => 4,
        }
    }

    /// Decodes a stored ordinal; out-of-range values are rejected.
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Awful),
            1 => Some(Self::Bad),
            2 => Some(Self::Neutral),
            3 => Some(Self::Good),
            4 => Some(Self::Great),
            _ => None,
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::Neutral
    }
}

/// Validation failures surfaced before an entry mutation reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Content is empty or whitespace-only.
    EmptyContent,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "journal content must not be blank"),
        }
    }
}

impl Error for EntryValidationError {}

/// Canonical diary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Store-assigned identifier; `0` until first insert.
    pub id: EntryId,
    /// Calendar day this entry describes.
    pub date: NaiveDate,
    /// Free-text body. Must be non-blank.
    pub content: String,
    pub mood: Mood,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JournalEntry {
    /// Creates an unsaved entry for `date` stamped with the current time.
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: 0,
            date,
            content: content.into(),
            mood: Mood::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks model-level invariants before persistence.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.content.trim().is_empty() {
            return Err(EntryValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Case-insensitive substring match against `content`.
    pub fn content_matches(&self, query: &str) -> bool {
        self.content.to_lowercase().contains(&query.to_lowercase())
    }
}
