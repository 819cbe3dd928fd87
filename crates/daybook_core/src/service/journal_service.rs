//! Journal use-case service.
//!
//! # Responsibility
//! - Provide stable create/update/delete entry points for diary records.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::model::journal::{EntryId, JournalEntry, Mood};
use crate::repo::journal_repo::{EntryListQuery, JournalRepository};
use crate::repo::RepoResult;
use chrono::NaiveDate;

/// Request model for creating a journal entry from form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEntryRequest {
    /// Calendar day the entry describes.
    pub date: NaiveDate,
    /// Free-text body. Blank content is rejected before persistence.
    pub content: String,
    pub mood: Mood,
}

/// Use-case service wrapper for journal operations.
pub struct JournalService<R: JournalRepository> {
    repo: R,
}

impl<R: JournalRepository> JournalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an entry from form input and returns the store-assigned
    /// identifier.
    pub fn create_entry(&self, request: &CreateEntryRequest) -> RepoResult<EntryId> {
        let mut entry = JournalEntry::new(request.date, request.content.clone());
        entry.mood = request.mood;
        self.repo.create_entry(&entry)
    }

    /// Updates an existing entry by identifier.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.repo.update_entry(entry)
    }

    /// Gets one entry by identifier.
    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        self.repo.get_entry(id)
    }

    /// Lists entries using filter and pagination options.
    pub fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<JournalEntry>> {
        self.repo.list_entries(query)
    }

    /// Hard-deletes an entry by identifier.
    pub fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        self.repo.delete_entry(id)
    }
}
