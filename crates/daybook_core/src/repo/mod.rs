//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce model `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::journal::{EntryId, EntryValidationError};
use crate::model::task::{TaskId, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod journal_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by task and journal persistence.
#[derive(Debug)]
pub enum RepoError {
    TaskValidation(TaskValidationError),
    EntryValidation(EntryValidationError),
    Db(DbError),
    TaskNotFound(TaskId),
    EntryNotFound(EntryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskValidation(err) => write!(f, "{err}"),
            Self::EntryValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskValidation(err) => Some(err),
            Self::EntryValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::TaskNotFound(_) => None,
            Self::EntryNotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::TaskValidation(value)
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::EntryValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
