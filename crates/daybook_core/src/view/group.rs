//! Date grouping for list surfaces.
//!
//! # Responsibility
//! - Bucket filtered tasks/entries into per-day groups in render order.
//!
//! # Invariants
//! - Groups are sorted descending by date.
//! - Within a group, tasks sort by priority descending then creation time
//!   descending; entries sort by creation time descending.
//! - Grouping is idempotent: flattening the groups and regrouping yields
//!   identical groups.

use crate::model::journal::JournalEntry;
use crate::model::task::Task;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One rendered day section with its items in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<T> {
    pub date: NaiveDate,
    pub items: Vec<T>,
}

/// Groups tasks by calendar date, newest day first.
pub fn group_tasks_by_date(tasks: Vec<Task>) -> Vec<DayGroup<Task>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        buckets.entry(task.calendar_date()).or_default().push(task);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, mut items)| {
            items.sort_by_key(|task| {
                (Reverse(task.priority), Reverse(task.created_at), Reverse(task.id))
            });
            DayGroup { date, items }
        })
        .collect()
}

/// Groups journal entries by their calendar date, newest day first.
pub fn group_entries_by_date(entries: Vec<JournalEntry>) -> Vec<DayGroup<JournalEntry>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<JournalEntry>> = BTreeMap::new();
    for entry in entries {
        buckets.entry(entry.date).or_default().push(entry);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, mut items)| {
            items.sort_by_key(|entry| (Reverse(entry.created_at), Reverse(entry.id)));
            DayGroup { date, items }
        })
        .collect()
}
