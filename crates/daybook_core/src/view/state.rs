//! UI view state and derived views.
//!
//! # Responsibility
//! - Hold the small set of UI flags list screens carry: active task
//!   filter, active journal filter, selected calendar day.
//! - Derive grouped task/journal views and the calendar map from
//!   snapshots.
//!
//! # Invariants
//! - Derivations are pure; this struct holds no data, only flags.
//! - `selected_date` narrows both list derivations to a single day.

use crate::model::journal::JournalEntry;
use crate::model::task::Task;
use crate::view::calendar::{day_statuses, DayStatus};
use crate::view::filter::{filter_entries, filter_tasks, JournalFilter, TaskFilter};
use crate::view::group::{group_entries_by_date, group_tasks_by_date, DayGroup};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// UI flags owned by the list/calendar screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub task_filter: TaskFilter,
    pub journal_filter: JournalFilter,
    /// Day tapped on the calendar; `None` shows the full history.
    pub selected_date: Option<NaiveDate>,
}

impl ViewState {
    /// Derives the task list view: filtered, optionally narrowed to the
    /// selected day, grouped newest day first.
    pub fn task_groups(&self, tasks: &[Task]) -> Vec<DayGroup<Task>> {
        let mut filtered = filter_tasks(tasks, self.task_filter);
        if let Some(day) = self.selected_date {
            filtered.retain(|task| task.calendar_date() == day);
        }
        group_tasks_by_date(filtered)
    }

    /// Derives the journal view: filtered, optionally narrowed to the
    /// selected day, grouped newest day first.
    pub fn entry_groups(&self, entries: &[JournalEntry]) -> Vec<DayGroup<JournalEntry>> {
        let mut filtered = filter_entries(entries, &self.journal_filter);
        if let Some(day) = self.selected_date {
            filtered.retain(|entry| entry.date == day);
        }
        group_entries_by_date(filtered)
    }

    /// Derives month-view day markers from unfiltered snapshots.
    ///
    /// Calendar markers intentionally ignore the active list filters so the
    /// month view stays stable while the user switches tabs.
    pub fn calendar(
        &self,
        tasks: &[Task],
        entries: &[JournalEntry],
    ) -> BTreeMap<NaiveDate, DayStatus> {
        day_statuses(tasks, entries)
    }
}
