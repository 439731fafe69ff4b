// Integration tests for the migration framework

use intraops_core::errors::ExErrorKind;
use intraops_store::migrations::{applied_migrations, apply_migrations};
use intraops_store::Database;
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    let result = apply_migrations(&mut conn);
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    let tables = get_table_names(&conn);
    for expected_table in ["account_groups", "payment_terms", "schema_version"] {
        assert!(
            tables.contains(&expected_table.to_string()),
            "Missing table: {}",
            expected_table
        );
    }
}

#[test]
fn test_migration_idempotency() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    let second = apply_migrations(&mut conn).unwrap();
    assert!(second.is_empty(), "Re-running migrations applies nothing");

    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 1, "Should still have exactly 1 migration");
}

#[test]
fn test_checksum_is_recorded() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    let applied = applied_migrations(&conn).unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].migration_id, "001_accounting_schema");
    assert_eq!(
        applied[0].checksum.len(),
        64,
        "SHA256 checksum should be 64 hex chars"
    );
}

#[test]
fn test_checksum_mismatch_is_refused() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    conn.execute(
        "UPDATE schema_version SET checksum = 'tampered' WHERE migration_id = ?",
        ["001_accounting_schema"],
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
    assert_eq!(err.entity_id(), Some("001_accounting_schema"));
    assert!(err.message().contains("tampered"));
}

#[test]
fn test_file_database_migrates_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("intraops.db");

    let db = Database::open(&path).unwrap();
    assert_eq!(db.migrate().unwrap(), vec!["001_accounting_schema"]);
    drop(db);

    let reopened = Database::open(&path).unwrap();
    assert!(reopened.migrate().unwrap().is_empty());
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();

    let tables = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();

    tables
}
