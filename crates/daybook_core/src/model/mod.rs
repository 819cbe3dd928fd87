//! Domain model for tasks and journal entries.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the two entities independent: they share no keys and are
//!   correlated only by calendar date at display time.
//!
//! # Invariants
//! - Identifiers are numeric, store-assigned and monotonic.
//! - Deletion is hard delete; no tombstone state exists in the model.

use chrono::{Local, NaiveDateTime, Timelike};

pub mod journal;
pub mod task;

/// Text format for timestamp columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text format for calendar-date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the current local timestamp truncated to whole seconds.
///
/// Truncation keeps in-memory values identical to what round-trips through
/// the `%Y-%m-%d %H:%M:%S` text column format.
pub fn current_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
