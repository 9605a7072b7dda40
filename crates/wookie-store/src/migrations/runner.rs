//! Migration runner
//!
//! Applies migrations in order, each in its own transaction, and refuses to
//! continue if an already-applied migration's SQL has changed.

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending migrations to the database
///
/// Safe to call on every start; migrations already recorded in
/// `schema_version` are skipped.
///
/// # Returns
/// The number of migrations applied by this call
///
/// # Errors
///
/// * `Persistence` - a migration failed (its transaction is rolled back), or
///   an applied migration's checksum no longer matches
pub fn apply_migrations(conn: &mut Connection) -> Result<usize> {
    create_schema_version_table(conn)?;

    let mut applied = 0;
    for migration in get_migrations() {
        if apply_migration(conn, migration.id, migration.sql)? {
            applied += 1;
        }
    }

    tracing::debug!(applied, "migrations up to date");
    Ok(applied)
}

/// Ids of the migrations recorded in `schema_version`, in application order
///
/// # Errors
///
/// * `Persistence` - the table cannot be read
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply one migration unless it is already recorded; returns whether it ran
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<bool> {
    let checksum = compute_checksum(sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(stored) = recorded {
        if let Some(stored) = stored.filter(|s| *s != checksum) {
            return Err(checksum_mismatch(migration_id, &stored, &checksum));
        }
        return Ok(false);
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id, "applied migration");
    Ok(true)
}
