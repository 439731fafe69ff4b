//! Migration runner
//!
//! Applies migrations in order, each in its own transaction, and refuses to
//! run against a database whose recorded checksums differ from the embedded
//! SQL.

use rusqlite::{Connection, OptionalExtension};

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;

/// A row of the `schema_version` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub migration_id: String,
    pub applied_at: i64,
    pub checksum: String,
}

/// Apply all pending migrations to the database
///
/// Returns the ids of the migrations applied by this call.
pub fn apply_migrations(conn: &mut Connection) -> Result<Vec<String>> {
    create_schema_version_table(conn)?;

    let mut applied = Vec::new();
    for migration in get_migrations() {
        if apply_migration(conn, migration.id, migration.sql)? {
            applied.push(migration.id.to_string());
        }
    }

    if !applied.is_empty() {
        tracing::info!(migrations = ?applied, "schema migrated");
    }
    Ok(applied)
}

/// Migrations recorded in the database, oldest first
pub fn applied_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    create_schema_version_table(conn)?;
    let mut stmt = conn
        .prepare("SELECT migration_id, applied_at, checksum FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AppliedMigration {
                migration_id: row.get(0)?,
                applied_at: row.get(1)?,
                checksum: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Create the schema_version table if it doesn't exist
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

/// Apply a single migration if not already applied
///
/// Returns whether the migration ran.
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<bool> {
    let checksum = compute_checksum(sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    match recorded {
        Some(Some(recorded)) if recorded != checksum => {
            return Err(checksum_mismatch(migration_id, &recorded, &checksum));
        }
        // Idempotent: already applied
        Some(_) => return Ok(false),
        None => {}
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        let applied = apply_migrations(&mut conn).unwrap();
        assert_eq!(applied, vec!["001_accounting_schema"]);
    }

    #[test]
    fn test_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        let applied = apply_migrations(&mut conn).unwrap();
        assert!(applied.is_empty());
        assert_eq!(applied_migrations(&conn).unwrap().len(), 1);
    }
}
