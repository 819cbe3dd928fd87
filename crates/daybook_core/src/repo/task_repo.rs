//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD plus completion-toggle APIs over `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Delete is a hard delete; a removed row is gone from every later read.
//! - `toggle_completed` is a read-modify-write that also stamps
//!   `updated_at`.

use crate::model::task::{Priority, Task, TaskId};
use crate::model::{current_timestamp, DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    priority,
    due_at,
    created_at,
    updated_at
FROM tasks";

/// Query options for listing tasks.
///
/// `completed: None` is the "all" tri-state; `Some(false)` is "active",
/// `Some(true)` is "completed".
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    pub completed: Option<bool>,
    /// Restrict to tasks whose due day equals this calendar date.
    pub due_on: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Inserts a task and returns the store-assigned identifier.
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    /// Hard-deletes a task. `TaskNotFound` when no row matched.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Flips the completion flag, stamps `updated_at`, returns the stored
    /// row after the write.
    fn toggle_completed(&self, id: TaskId) -> RepoResult<Task>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                title,
                description,
                completed,
                priority,
                due_at,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.title.as_str(),
                task.description.as_str(),
                bool_to_int(task.completed),
                task.priority.ordinal(),
                task.due_at.map(encode_timestamp),
                encode_timestamp(task.created_at),
                encode_timestamp(task.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                completed = ?3,
                priority = ?4,
                due_at = ?5,
                updated_at = ?6
             WHERE id = ?7;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                bool_to_int(task.completed),
                task.priority.ordinal(),
                task.due_at.map(encode_timestamp),
                encode_timestamp(task.updated_at),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        if let Some(day) = query.due_on {
            // due_at stores a full timestamp; compare on its date prefix.
            sql.push_str(" AND due_at IS NOT NULL AND substr(due_at, 1, 10) = ?");
            bind_values.push(Value::Text(day.format(DATE_FORMAT).to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

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
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }

        Ok(())
    }

    fn toggle_completed(&self, id: TaskId) -> RepoResult<Task> {
        let mut task = self.get_task(id)?.ok_or(RepoError::TaskNotFound(id))?;
        task.toggle_completed(current_timestamp());

        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3;",
            params![
                bool_to_int(task.completed),
                encode_timestamp(task.updated_at),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }

        Ok(task)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let priority_value: i64 = row.get("priority")?;
    let priority = Priority::from_ordinal(priority_value).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority value `{priority_value}` in tasks.priority"
        ))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let due_at = match row.get::<_, Option<String>>("due_at")? {
        Some(text) => Some(decode_timestamp(&text, "tasks.due_at")?),
        None => None,
    };

    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    let task = Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        priority,
        due_at,
        created_at: decode_timestamp(&created_at, "tasks.created_at")?,
        updated_at: decode_timestamp(&updated_at, "tasks.updated_at")?,
    };
    task.validate()?;
    Ok(task)
}

pub(crate) fn encode_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn decode_timestamp(text: &str, column: &str) -> RepoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid timestamp `{text}` in {column}"))
    })
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
