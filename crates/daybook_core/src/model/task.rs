//! Task domain model.
//!
//! # Responsibility
//! - Define the todo record and its completion lifecycle.
//! - Provide the calendar-date bucketing rule used by list grouping and
//!   the month view.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never reused.
//! - `title` must be non-blank before any mutation is attempted.
//! - `updated_at >= created_at` holds by convention, not enforcement.

use crate::model::current_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier for tasks.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// `0` denotes a task that has not been persisted yet.
pub type TaskId = i64;

/// Task urgency on a three-step ordinal scale.
///
/// The wire/database encoding is the ordinal value, so variant order is a
/// compatibility contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the stable ordinal used in storage and FFI (0..=2).
    pub fn ordinal(self) -> i64 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Decodes a stored ordinal; out-of-range values are rejected.
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Validation failures surfaced before a task mutation reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier; `0` until first insert.
    pub id: TaskId,
    /// Short display title. Must be non-blank.
    pub title: String,
    /// Free-text detail body; may be empty.
    pub description: String,
    /// Completion flag toggled from list surfaces.
    pub completed: bool,
    pub priority: Priority,
    /// Optional due timestamp; tasks without one bucket under their
    /// creation date.
    pub due_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// Creates an unsaved task stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            completed: false,
            priority: Priority::default(),
            due_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks model-level invariants before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flips the completion flag and stamps `updated_at`.
    pub fn toggle_completed(&mut self, now: NaiveDateTime) {
        self.completed = !self.completed;
        self.updated_at = now;
    }

    /// Calendar day this task belongs to for grouping and the month view:
    /// the due date when one is set, otherwise the creation date.
    pub fn calendar_date(&self) -> NaiveDate {
        self.due_at.map_or_else(|| self.created_at.date(), |due| due.date())
    }
}
