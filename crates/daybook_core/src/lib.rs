//! Core domain logic for Daybook.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::journal::{EntryId, EntryValidationError, JournalEntry, Mood};
pub use model::task::{Priority, Task, TaskId, TaskValidationError};
pub use repo::journal_repo::{EntryListQuery, JournalRepository, SqliteJournalRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::journal_service::{CreateEntryRequest, JournalService};
pub use service::task_service::{CreateTaskRequest, TaskService};
pub use store::{Store, StoreEvent};
pub use view::calendar::{day_statuses, DayStatus};
pub use view::filter::{filter_entries, filter_tasks, JournalFilter, TaskFilter};
pub use view::group::{group_entries_by_date, group_tasks_by_date, DayGroup};
pub use view::state::ViewState;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
