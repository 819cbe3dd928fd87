//! Snapshot filtering for list surfaces.
//!
//! # Responsibility
//! - Apply the task completion tri-state and the journal mood/text filters
//!   over in-memory snapshots.
//!
//! # Invariants
//! - Filtering preserves input order.
//! - "Active" and "Completed" results are disjoint subsets of "All".
//! - Text matching is case-insensitive substring containment; a blank
//!   query matches everything.

use crate::model::journal::{JournalEntry, Mood};
use crate::model::task::Task;

/// Completion tri-state shown as tabs above the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    /// SQL-level equivalent: the `completed` predicate for list queries.
    pub fn completed_predicate(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(false),
            Self::Completed => Some(true),
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Journal list filter: optional mood plus optional content query.
///
/// Both conditions must hold when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalFilter {
    pub mood: Option<Mood>,
    /// Case-insensitive substring matched against entry content.
    pub query: Option<String>,
}

impl JournalFilter {
    fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(mood) = self.mood {
            if entry.mood != mood {
                return false;
            }
        }
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => entry.content_matches(query),
            _ => true,
        }
    }
}

/// Applies the completion tri-state to a task snapshot.
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Applies mood and content-query filters to a journal snapshot.
pub fn filter_entries(entries: &[JournalEntry], filter: &JournalFilter) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}
