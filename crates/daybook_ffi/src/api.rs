//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide store handle, lazily constructed on first use
//!   and never explicitly closed.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Mutations are fire-and-forget: a success response means the write was
//!   accepted, not that it is durable; the UI re-reads after the change
//!   lands.
//! - Dates/timestamps cross the boundary as fixed-format text
//!   (`%Y-%m-%d` / `%Y-%m-%d %H:%M:%S`); enums cross as their ordinal.

use chrono::{NaiveDate, NaiveDateTime};
use daybook_core::db::open_db;
use daybook_core::model::{DATE_FORMAT, TIMESTAMP_FORMAT};
use daybook_core::{
    core_version as core_version_inner, day_statuses, init_logging as init_logging_inner,
    ping as ping_inner, CreateEntryRequest, CreateTaskRequest, EntryListQuery, JournalEntry,
    JournalFilter, JournalRepository, Mood, Priority, SqliteJournalRepository,
    SqliteTaskRepository, Store, Task, TaskListQuery, TaskRepository,
};
use log::error;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "daybook.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: OnceLock<Option<Store>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Priority ordinal (0=low, 1=medium, 2=high).
    pub priority: u8,
    /// Optional `%Y-%m-%d %H:%M:%S` due timestamp.
    pub due_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Journal row crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDto {
    pub id: i64,
    /// `%Y-%m-%d` calendar date.
    pub date: String,
    pub content: String,
    /// Mood ordinal (0=awful .. 4=great).
    pub mood: u8,
    pub created_at: String,
    pub updated_at: String,
}

/// One calendar day's markers for the month view and widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarkerDto {
    /// `%Y-%m-%d` calendar date.
    pub date: String,
    pub has_task: bool,
    pub has_completed_task: bool,
    pub has_entry: bool,
}

/// Generic action response envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the mutation was accepted.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn accepted(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Queues a task creation from form input.
///
/// # FFI contract
/// - Sync call; returns once the write is queued.
/// - Blank titles are rejected inline, surfaced via `ok=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(
    title: String,
    description: String,
    priority: u8,
    due_at: Option<String>,
) -> ActionResponse {
    let Some(priority) = Priority::from_ordinal(i64::from(priority)) else {
        return ActionResponse::rejected(format!("invalid priority ordinal `{priority}`"));
    };
    let due_at = match due_at.as_deref().map(parse_timestamp) {
        Some(Ok(value)) => Some(value),
        Some(Err(message)) => return ActionResponse::rejected(message),
        None => None,
    };

    with_store(|store| {
        let request = CreateTaskRequest {
            title: title.trim().to_string(),
            description,
            priority,
            due_at,
        };
        match store.create_task(request) {
            Ok(()) => ActionResponse::accepted("Task queued."),
            Err(err) => ActionResponse::rejected(err.to_string()),
        }
    })
}

/// Queues a full-row task update.
///
/// # FFI contract
/// - Sync call; returns once the write is queued.
/// - Blank titles and malformed dates are rejected inline.
/// - Unknown ids degrade to a logged no-op (last-write-wins semantics).
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(task: TaskDto) -> ActionResponse {
    let task = match decode_task(task) {
        Ok(task) => task,
        Err(message) => return ActionResponse::rejected(message),
    };

    with_store(|store| match store.update_task(task) {
        Ok(()) => ActionResponse::accepted("Task update queued."),
        Err(err) => ActionResponse::rejected(err.to_string()),
    })
}

/// Queues a completion toggle for one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: i64) -> ActionResponse {
    with_store(|store| {
        store.toggle_task(id);
        ActionResponse::accepted("Toggle queued.")
    })
}

/// Queues a hard delete for one task.
///
/// Deletion is irreversible at the data layer; screen-level "undo"
/// re-creates a copy with a new identifier.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: i64) -> ActionResponse {
    with_store(|store| {
        store.delete_task(id);
        ActionResponse::accepted("Delete queued.")
    })
}

/// Lists tasks with the completion tri-state and optional due-day filter.
///
/// # FFI contract
/// - Sync call, DB-backed read.
/// - Read failures degrade to an empty list (logged core-side).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list(completed: Option<bool>, due_on: Option<String>) -> Vec<TaskDto> {
    let due_on = match due_on.as_deref().map(parse_date) {
        Some(Ok(day)) => Some(day),
        Some(Err(message)) => {
            error!("event=ffi_read module=ffi op=task_list status=rejected error={message}");
            return Vec::new();
        }
        None => None,
    };

    with_store(|store| {
        let query = TaskListQuery {
            completed,
            due_on,
            ..TaskListQuery::default()
        };
        store.tasks(&query).into_iter().map(encode_task).collect()
    })
}

/// Queues a journal entry creation from form input.
///
/// # FFI contract
/// - Sync call; returns once the write is queued.
/// - Blank content and malformed dates are rejected inline.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_create(date: String, content: String, mood: u8) -> ActionResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => return ActionResponse::rejected(message),
    };
    let Some(mood) = Mood::from_ordinal(i64::from(mood)) else {
        return ActionResponse::rejected(format!("invalid mood ordinal `{mood}`"));
    };

    with_store(|store| {
        let request = CreateEntryRequest {
            date,
            content: content.clone(),
            mood,
        };
        match store.create_entry(request) {
            Ok(()) => ActionResponse::accepted("Entry queued."),
            Err(err) => ActionResponse::rejected(err.to_string()),
        }
    })
}

/// Queues a full-row journal entry update.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_update(entry: EntryDto) -> ActionResponse {
    let entry = match decode_entry(entry) {
        Ok(entry) => entry,
        Err(message) => return ActionResponse::rejected(message),
    };

    with_store(|store| match store.update_entry(entry) {
        Ok(()) => ActionResponse::accepted("Entry update queued."),
        Err(err) => ActionResponse::rejected(err.to_string()),
    })
}

/// Queues a hard delete for one journal entry.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete(id: i64) -> ActionResponse {
    with_store(|store| {
        store.delete_entry(id);
        ActionResponse::accepted("Delete queued.")
    })
}

/// Lists journal entries with optional mood and day filters.
///
/// # FFI contract
/// - Sync call, DB-backed read.
/// - Read failures degrade to an empty list (logged core-side).
#[flutter_rust_bridge::frb(sync)]
pub fn journal_list(mood: Option<u8>, on: Option<String>) -> Vec<EntryDto> {
    let mood = match mood.map(|value| Mood::from_ordinal(i64::from(value))) {
        Some(Some(mood)) => Some(mood),
        Some(None) => {
            error!("event=ffi_read module=ffi op=journal_list status=rejected error=invalid_mood");
            return Vec::new();
        }
        None => None,
    };
    let on = match on.as_deref().map(parse_date) {
        Some(Ok(day)) => Some(day),
        Some(Err(message)) => {
            error!("event=ffi_read module=ffi op=journal_list status=rejected error={message}");
            return Vec::new();
        }
        None => None,
    };

    with_store(|store| {
        let query = EntryListQuery {
            mood,
            on,
            ..EntryListQuery::default()
        };
        store
            .journal_entries(&query)
            .into_iter()
            .map(encode_entry)
            .collect()
    })
}

/// Case-insensitive substring search over journal content.
///
/// Blank queries return the full journal, mirroring the search box being
/// cleared.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_search(query: String) -> Vec<EntryDto> {
    with_store(|store| {
        let snapshot = store.journal_entries(&EntryListQuery::default());
        let filter = JournalFilter {
            mood: None,
            query: Some(query.clone()),
        };
        daybook_core::filter_entries(&snapshot, &filter)
            .into_iter()
            .map(encode_entry)
            .collect()
    })
}

/// Derives month-view day markers from the shared store.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_day_markers() -> Vec<DayMarkerDto> {
    with_store(|store| {
        store
            .day_statuses()
            .into_iter()
            .map(|(date, status)| DayMarkerDto {
                date: date.format(DATE_FORMAT).to_string(),
                has_task: status.has_task,
                has_completed_task: status.has_completed_task,
                has_entry: status.has_entry,
            })
            .collect()
    })
}

/// Read-only day markers for the home-screen widget process.
///
/// The widget refreshes on a periodic trigger outside the app lifecycle,
/// so this opens its own short-lived connection instead of touching the
/// app's store handle.
#[flutter_rust_bridge::frb(sync)]
pub fn widget_day_markers() -> Vec<DayMarkerDto> {
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=ffi_read module=ffi op=widget_day_markers status=error error={err}");
            return Vec::new();
        }
    };

    let tasks = match SqliteTaskRepository::new(&conn).list_tasks(&TaskListQuery::default()) {
        Ok(tasks) => tasks,
        Err(err) => {
            error!("event=ffi_read module=ffi op=widget_day_markers status=error error={err}");
            Vec::new()
        }
    };
    let entries = match SqliteJournalRepository::new(&conn).list_entries(&EntryListQuery::default())
    {
        Ok(entries) => entries,
        Err(err) => {
            error!("event=ffi_read module=ffi op=widget_day_markers status=error error={err}");
            Vec::new()
        }
    };

    day_statuses(&tasks, &entries)
        .into_iter()
        .map(|(date, status)| DayMarkerDto {
            date: date.format(DATE_FORMAT).to_string(),
            has_task: status.has_task,
            has_completed_task: status.has_completed_task,
            has_entry: status.has_entry,
        })
        .collect()
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DAYBOOK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

/// Runs a closure against the lazy process-wide store.
///
/// A store that failed to open stays failed for the process lifetime; all
/// calls then see the closure's empty/rejected default through
/// `Store`-level error swallowing.
fn with_store<T: FfiDefault>(f: impl FnOnce(&Store) -> T) -> T {
    let store = STORE.get_or_init(|| match Store::open(resolve_db_path()) {
        Ok(store) => Some(store),
        Err(err) => {
            error!("event=store_open module=ffi status=error error={err}");
            None
        }
    });

    match store {
        Some(store) => f(store),
        None => T::ffi_default(),
    }
}

/// Fallback values returned when the store never opened.
trait FfiDefault {
    fn ffi_default() -> Self;
}

impl FfiDefault for ActionResponse {
    fn ffi_default() -> Self {
        Self::rejected("store unavailable")
    }
}

impl<T> FfiDefault for Vec<T> {
    fn ffi_default() -> Self {
        Vec::new()
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{text}`; expected {DATE_FORMAT}"))
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| format!("invalid timestamp `{text}`; expected {TIMESTAMP_FORMAT}"))
}

fn decode_task(dto: TaskDto) -> Result<Task, String> {
    let priority = Priority::from_ordinal(i64::from(dto.priority))
        .ok_or_else(|| format!("invalid priority ordinal `{}`", dto.priority))?;
    Ok(Task {
        id: dto.id,
        title: dto.title,
        description: dto.description,
        completed: dto.completed,
        priority,
        due_at: dto.due_at.as_deref().map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(&dto.created_at)?,
        updated_at: parse_timestamp(&dto.updated_at)?,
    })
}

fn encode_task(task: Task) -> TaskDto {
    TaskDto {
        id: task.id,
        title: task.title,
        description: task.description,
        completed: task.completed,
        priority: task.priority.ordinal() as u8,
        due_at: task
            .due_at
            .map(|value| value.format(TIMESTAMP_FORMAT).to_string()),
        created_at: task.created_at.format(TIMESTAMP_FORMAT).to_string(),
        updated_at: task.updated_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

fn decode_entry(dto: EntryDto) -> Result<JournalEntry, String> {
    let mood = Mood::from_ordinal(i64::from(dto.mood))
        .ok_or_else(|| format!("invalid mood ordinal `{}`", dto.mood))?;
    Ok(JournalEntry {
        id: dto.id,
        date: parse_date(&dto.date)?,
        content: dto.content,
        mood,
        created_at: parse_timestamp(&dto.created_at)?,
        updated_at: parse_timestamp(&dto.updated_at)?,
    })
}

fn encode_entry(entry: JournalEntry) -> EntryDto {
    EntryDto {
        id: entry.id,
        date: entry.date.format(DATE_FORMAT).to_string(),
        content: entry.content,
        mood: entry.mood.ordinal() as u8,
        created_at: entry.created_at.format(TIMESTAMP_FORMAT).to_string(),
        updated_at: entry.updated_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, decode_entry, decode_task, encode_entry, encode_task, init_logging,
        journal_create, parse_date, parse_timestamp, ping, task_create, widget_day_markers,
        EntryDto, TaskDto,
    };
    use chrono::NaiveDate;

    fn valid_task_dto() -> TaskDto {
        TaskDto {
            id: 7,
            title: "pay rent".to_string(),
            description: String::new(),
            completed: false,
            priority: 2,
            due_at: Some("2025-09-01 12:00:00".to_string()),
            created_at: "2025-08-30 08:15:00".to_string(),
            updated_at: "2025-08-30 08:15:00".to_string(),
        }
    }

    fn valid_entry_dto() -> EntryDto {
        EntryDto {
            id: 3,
            date: "2025-08-30".to_string(),
            content: "quiet saturday".to_string(),
            mood: 3,
            created_at: "2025-08-30 21:00:00".to_string(),
            updated_at: "2025-08-30 21:00:00".to_string(),
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn task_create_rejects_invalid_priority_ordinal() {
        let response = task_create("groceries".to_string(), String::new(), 7, None);
        assert!(!response.ok);
        assert!(response.message.contains("priority"));
    }

    #[test]
    fn task_create_rejects_malformed_due_timestamp() {
        let response = task_create(
            "groceries".to_string(),
            String::new(),
            1,
            Some("soon".to_string()),
        );
        assert!(!response.ok);
        assert!(response.message.contains("invalid timestamp"));
    }

    #[test]
    fn journal_create_rejects_malformed_date() {
        let response = journal_create("yesterday".to_string(), "body".to_string(), 2);
        assert!(!response.ok);
        assert!(response.message.contains("invalid date"));
    }

    #[test]
    fn journal_create_rejects_invalid_mood_ordinal() {
        let response = journal_create("2025-08-30".to_string(), "body".to_string(), 9);
        assert!(!response.ok);
        assert!(response.message.contains("mood"));
    }

    #[test]
    fn parse_helpers_trim_and_reject_garbage() {
        assert_eq!(
            parse_date(" 2025-08-30 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 30).unwrap()
        );
        assert!(parse_date("2025-13-99").is_err());

        let stamp = parse_timestamp("2025-08-30 08:15:00").unwrap();
        assert_eq!(stamp.date(), NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());
        assert!(parse_timestamp("2025-08-30").is_err());
    }

    #[test]
    fn task_dto_round_trips_through_decode_and_encode() {
        let dto = valid_task_dto();
        let decoded = decode_task(dto.clone()).unwrap();
        assert_eq!(encode_task(decoded), dto);
    }

    #[test]
    fn entry_dto_round_trips_through_decode_and_encode() {
        let dto = valid_entry_dto();
        let decoded = decode_entry(dto.clone()).unwrap();
        assert_eq!(encode_entry(decoded), dto);
    }

    #[test]
    fn decode_rejects_bad_ordinals_and_timestamps() {
        let mut bad_priority = valid_task_dto();
        bad_priority.priority = 9;
        assert!(decode_task(bad_priority).unwrap_err().contains("priority"));

        let mut bad_stamp = valid_task_dto();
        bad_stamp.created_at = "not a time".to_string();
        assert!(decode_task(bad_stamp)
            .unwrap_err()
            .contains("invalid timestamp"));

        let mut bad_mood = valid_entry_dto();
        bad_mood.mood = 5;
        assert!(decode_entry(bad_mood).unwrap_err().contains("mood"));

        let mut bad_date = valid_entry_dto();
        bad_date.date = "30/08/2025".to_string();
        assert!(decode_entry(bad_date).unwrap_err().contains("invalid date"));
    }

    #[test]
    fn widget_day_markers_returns_without_panicking() {
        // Exercises the short-lived widget connection end to end; read
        // failures must degrade to an empty list, never a panic.
        let _markers = widget_day_markers();
    }
}
