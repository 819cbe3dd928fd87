//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable create/update/toggle/delete entry points for core
//!   callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::task::{Priority, Task, TaskId};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::RepoResult;
use chrono::NaiveDateTime;

/// Request model for creating a task from form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Display title. Blank titles are rejected before persistence.
    pub title: String,
    /// Free-text detail body; may be empty.
    pub description: String,
    pub priority: Priority,
    /// Optional due timestamp.
    pub due_at: Option<NaiveDateTime>,
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task from form input.
    ///
    /// # Contract
    /// - New tasks start uncompleted.
    /// - Returns the store-assigned identifier.
    pub fn create_task(&self, request: &CreateTaskRequest) -> RepoResult<TaskId> {
        let mut task = Task::new(request.title.clone(), request.description.clone());
        task.priority = request.priority;
        task.due_at = request.due_at;
        self.repo.create_task(&task)
    }

    /// Updates an existing task by identifier.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.repo.update_task(task)
    }

    /// Gets one task by identifier.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Lists tasks using filter and pagination options.
    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks(query)
    }

    /// Hard-deletes a task by identifier.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)
    }

    /// Flips the completion flag and returns the stored row after the
    /// write. Toggling twice restores the original flag; only
    /// `updated_at` keeps moving.
    pub fn toggle_completed(&self, id: TaskId) -> RepoResult<Task> {
        self.repo.toggle_completed(id)
    }
}
