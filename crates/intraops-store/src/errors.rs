//! Error helpers for intraops-store
//!
//! Wraps intraops-core ExError with store-specific constructors

use intraops_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Conflict)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
///
/// Constraint violations surface as `Conflict`, everything else as
/// `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ExErrorKind::Conflict
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind).with_op("sqlite").with_message(err.to_string())
}

/// Create an error for a stored value that cannot be decoded
pub fn corrupt_row(table: &str, id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("decode_row")
        .with_entity_id(id)
        .with_message(format!("Corrupt {} row: {}", table, reason))
}

/// Create an error for a poisoned connection lock
pub fn lock_poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("sqlite")
        .with_message("database connection lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_maps_to_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (k TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .map_err(from_rusqlite)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Conflict);
    }

    #[test]
    fn test_other_failures_are_persistence() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn
            .execute("INSERT INTO missing VALUES (1)", [])
            .map_err(from_rusqlite)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
    }
}
