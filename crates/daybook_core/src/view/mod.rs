//! View-state derivation over in-memory snapshots.
//!
//! # Responsibility
//! - Turn task/journal snapshots into the filtered, grouped and
//!   calendar-bucketed shapes the UI renders.
//! - Stay pure: no storage access, no side effects, recomputed on every
//!   change notification.
//!
//! # Invariants
//! - Empty inputs produce empty outputs, never errors.
//! - Derivations never mutate the snapshots they are given.

pub mod calendar;
pub mod filter;
pub mod group;
pub mod state;
