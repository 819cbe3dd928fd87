//! Process-wide store with fire-and-forget writes and change events.
//!
//! # Responsibility
//! - Own the shared SQLite connection behind a mutex.
//! - Serialize all writes on one background worker thread fed by a job
//!   queue; callers enqueue and return immediately.
//! - Fan change events out to subscribers so screens re-read snapshots.
//!
//! # Invariants
//! - Blank required fields are rejected synchronously, before a job is
//!   enqueued; every other write failure is logged and swallowed.
//! - Concurrent edits resolve last-write-wins; there is no conflict
//!   detection and no application-level locking beyond the connection
//!   mutex.
//! - Snapshots are owned values; a snapshot taken before a delete is
//!   unaffected by it.
//! - Dropping the store closes the queue and stops the worker; in-flight
//!   jobs past the queue are still completed, unqueued ones are abandoned.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::journal::{EntryId, EntryValidationError, JournalEntry};
use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::journal_repo::{EntryListQuery, JournalRepository, SqliteJournalRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
use crate::service::journal_service::{CreateEntryRequest, JournalService};
use crate::service::task_service::{CreateTaskRequest, TaskService};
use crate::view::calendar::{day_statuses, DayStatus};
use chrono::NaiveDate;
use log::{error, info};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

/// Change notification delivered to subscribers after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    TasksChanged,
    JournalChanged,
}

/// Write job carried from a caller to the worker thread.
#[derive(Debug)]
enum Job {
    CreateTask(CreateTaskRequest),
    UpdateTask(Task),
    DeleteTask(TaskId),
    ToggleTask(TaskId),
    CreateEntry(CreateEntryRequest),
    UpdateEntry(JournalEntry),
    DeleteEntry(EntryId),
}

impl Job {
    fn op_name(&self) -> &'static str {
        match self {
            Self::CreateTask(_) => "create_task",
            Self::UpdateTask(_) => "update_task",
            Self::DeleteTask(_) => "delete_task",
            Self::ToggleTask(_) => "toggle_task",
            Self::CreateEntry(_) => "create_entry",
            Self::UpdateEntry(_) => "update_entry",
            Self::DeleteEntry(_) => "delete_entry",
        }
    }

    fn event(&self) -> StoreEvent {
        match self {
            Self::CreateTask(_) | Self::UpdateTask(_) | Self::DeleteTask(_) | Self::ToggleTask(_) => {
                StoreEvent::TasksChanged
            }
            Self::CreateEntry(_) | Self::UpdateEntry(_) | Self::DeleteEntry(_) => {
                StoreEvent::JournalChanged
            }
        }
    }
}

type Subscribers = Arc<Mutex<Vec<Sender<StoreEvent>>>>;

/// Shared store handle.
///
/// One instance is shared process-wide, lazily constructed on first access
/// (see the FFI crate) and never explicitly closed.
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    jobs: Sender<Job>,
    subscribers: Subscribers,
}

impl Store {
    /// Opens a file-backed store and starts its writer thread.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Self::start(open_db(path)?)
    }

    /// Opens an in-memory store; used by tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::start(open_db_in_memory()?)
    }

    fn start(conn: Connection) -> DbResult<Self> {
        let conn = Arc::new(Mutex::new(conn));
        let subscribers: Subscribers = Arc::new(Mutex::new(Vec::new()));
        let (jobs, job_rx) = channel::<Job>();

        let worker_conn = Arc::clone(&conn);
        let worker_subscribers = Arc::clone(&subscribers);
        thread::spawn(move || run_writer(&worker_conn, &worker_subscribers, &job_rx));

        info!("event=store_open module=store status=ok");
        Ok(Self {
            conn,
            jobs,
            subscribers,
        })
    }

    /// Registers a change-event subscriber.
    ///
    /// The receiver delivers one event per successful write until the
    /// subscriber drops it; dropped subscribers are pruned on the next
    /// notification.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(tx),
            Err(poisoned) => poisoned.into_inner().push(tx),
        }
        rx
    }

    /// Enqueues a task creation. Blank titles are rejected inline; the
    /// insert itself is fire-and-forget.
    pub fn create_task(&self, request: CreateTaskRequest) -> Result<(), TaskValidationError> {
        if request.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        self.enqueue(Job::CreateTask(request));
        Ok(())
    }

    /// Enqueues a full-row task update. Blank titles are rejected inline.
    pub fn update_task(&self, task: Task) -> Result<(), TaskValidationError> {
        task.validate()?;
        self.enqueue(Job::UpdateTask(task));
        Ok(())
    }

    /// Enqueues a hard delete; unknown ids degrade to a logged no-op.
    pub fn delete_task(&self, id: TaskId) {
        self.enqueue(Job::DeleteTask(id));
    }

    /// Enqueues a completion toggle; unknown ids degrade to a logged no-op.
    pub fn toggle_task(&self, id: TaskId) {
        self.enqueue(Job::ToggleTask(id));
    }

    /// Enqueues a journal entry creation. Blank content is rejected inline.
    pub fn create_entry(&self, request: CreateEntryRequest) -> Result<(), EntryValidationError> {
        if request.content.trim().is_empty() {
            return Err(EntryValidationError::EmptyContent);
        }
        self.enqueue(Job::CreateEntry(request));
        Ok(())
    }

    /// Enqueues a full-row entry update. Blank content is rejected inline.
    pub fn update_entry(&self, entry: JournalEntry) -> Result<(), EntryValidationError> {
        entry.validate()?;
        self.enqueue(Job::UpdateEntry(entry));
        Ok(())
    }

    /// Enqueues a hard delete; unknown ids degrade to a logged no-op.
    pub fn delete_entry(&self, id: EntryId) {
        self.enqueue(Job::DeleteEntry(id));
    }

    /// Reads a task snapshot; query failures degrade to an empty list.
    pub fn tasks(&self, query: &TaskListQuery) -> Vec<Task> {
        let conn = self.lock_conn();
        let repo = SqliteTaskRepository::new(&conn);
        match repo.list_tasks(query) {
            Ok(tasks) => tasks,
            Err(err) => {
                error!("event=store_read module=store op=list_tasks status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Reads a journal snapshot; query failures degrade to an empty list.
    pub fn journal_entries(&self, query: &EntryListQuery) -> Vec<JournalEntry> {
        let conn = self.lock_conn();
        let repo = SqliteJournalRepository::new(&conn);
        match repo.list_entries(query) {
            Ok(entries) => entries,
            Err(err) => {
                error!("event=store_read module=store op=list_entries status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Derives calendar day markers from full snapshots of both tables.
    pub fn day_statuses(&self) -> BTreeMap<NaiveDate, DayStatus> {
        let tasks = self.tasks(&TaskListQuery::default());
        let entries = self.journal_entries(&EntryListQuery::default());
        day_statuses(&tasks, &entries)
    }

    fn enqueue(&self, job: Job) {
        // A closed queue means the worker is gone (process teardown);
        // fire-and-forget semantics allow dropping the write.
        if self.jobs.send(job).is_err() {
            error!("event=store_write module=store status=dropped reason=worker_stopped");
        }
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Writer loop: drains the job queue until every `Store` handle is gone.
fn run_writer(conn: &Arc<Mutex<Connection>>, subscribers: &Subscribers, jobs: &Receiver<Job>) {
    while let Ok(job) = jobs.recv() {
        let op = job.op_name();
        let event = job.event();

        let result = {
            let guard = match conn.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            apply_job(&guard, job)
        };

        match result {
            Ok(()) => {
                info!("event=store_write module=store op={op} status=ok");
                notify(subscribers, event);
            }
            Err(err) => {
                // Write failures degrade to a logged no-op; nothing is
                // surfaced to the caller.
                error!("event=store_write module=store op={op} status=error error={err}");
            }
        }
    }
    info!("event=store_close module=store status=ok reason=queue_closed");
}

fn apply_job(conn: &Connection, job: Job) -> crate::repo::RepoResult<()> {
    match job {
        Job::CreateTask(request) => {
            let service = TaskService::new(SqliteTaskRepository::new(conn));
            service.create_task(&request).map(|_| ())
        }
        Job::UpdateTask(task) => {
            let service = TaskService::new(SqliteTaskRepository::new(conn));
            service.update_task(&task)
        }
        Job::DeleteTask(id) => {
            let service = TaskService::new(SqliteTaskRepository::new(conn));
            service.delete_task(id)
        }
        Job::ToggleTask(id) => {
            let service = TaskService::new(SqliteTaskRepository::new(conn));
            service.toggle_completed(id).map(|_| ())
        }
        Job::CreateEntry(request) => {
            let service = JournalService::new(SqliteJournalRepository::new(conn));
            service.create_entry(&request).map(|_| ())
        }
        Job::UpdateEntry(entry) => {
            let service = JournalService::new(SqliteJournalRepository::new(conn));
            service.update_entry(&entry)
        }
        Job::DeleteEntry(id) => {
            let service = JournalService::new(SqliteJournalRepository::new(conn));
            service.delete_entry(id)
        }
    }
}

fn notify(subscribers: &Subscribers, event: StoreEvent) {
    let mut subscribers = match subscribers.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    subscribers.retain(|subscriber| subscriber.send(event).is_ok());
}
