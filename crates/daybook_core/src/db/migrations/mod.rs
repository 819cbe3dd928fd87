//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Rebuild the schema when the on-disk version is newer than this binary
//!   supports.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - A rebuild drops application tables only; it never touches other
//!   attachments on the connection.

use crate::db::DbResult;
use log::warn;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_date_indexes.sql"),
    },
];

const DROP_ALL_SQL: &str = "
DROP TABLE IF EXISTS tasks;
DROP TABLE IF EXISTS journal_entries;
";

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// When the database carries a version newer than [`latest_version`], the
/// application tables are destroyed and recreated from scratch. That is the
/// only downgrade strategy: local data is display cache plus user notes,
/// never the system of record for anything else.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let mut current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        warn!(
            "event=db_migrate module=db status=rebuild db_version={} latest_supported={}",
            current_version, latest
        );
        let tx = conn.transaction()?;
        tx.execute_batch(DROP_ALL_SQL)?;
        tx.execute_batch("PRAGMA user_version = 0;")?;
        tx.commit()?;
        current_version = 0;
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
