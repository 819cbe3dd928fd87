//! Per-day calendar status aggregation.
//!
//! # Responsibility
//! - Map full task/journal snapshots to one status descriptor per calendar
//!   day, for month-view markers.
//!
//! # Invariants
//! - Pure function of its inputs.
//! - A date appears in the map only when at least one marker is set.

use crate::model::journal::JournalEntry;
use crate::model::task::Task;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Markers shown on a single calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStatus {
    /// At least one task buckets under this day.
    pub has_task: bool,
    /// At least one of those tasks is completed.
    pub has_completed_task: bool,
    /// At least one journal entry exists for this day.
    pub has_entry: bool,
}

/// Buckets tasks and journal entries by calendar day.
///
/// Tasks bucket under their due date when set, else their creation date
/// (see `Task::calendar_date`). Journal entries bucket under their own
/// `date` field.
pub fn day_statuses(tasks: &[Task], entries: &[JournalEntry]) -> BTreeMap<NaiveDate, DayStatus> {
    let mut days: BTreeMap<NaiveDate, DayStatus> = BTreeMap::new();

    for task in tasks {
        let status = days.entry(task.calendar_date()).or_default();
        status.has_task = true;
        if task.completed {
            status.has_completed_task = true;
        }
    }

    for entry in entries {
        days.entry(entry.date).or_default().has_entry = true;
    }

    days
}
