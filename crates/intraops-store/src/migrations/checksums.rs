//! Migration fingerprints recorded in `schema_version.checksum`

use sha2::{Digest, Sha256};

/// Hex SHA-256 of a migration's SQL text
pub fn compute_checksum(sql: &str) -> String {
    hex::encode(Sha256::digest(sql.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::embedded::get_migrations;
    use crate::migrations::{applied_migrations, apply_migrations};

    #[test]
    fn test_recorded_checksum_fingerprints_embedded_sql() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        let recorded = applied_migrations(&conn).unwrap();
        let embedded = get_migrations();
        assert_eq!(recorded.len(), embedded.len());
        for (row, migration) in recorded.iter().zip(&embedded) {
            assert_eq!(row.migration_id, migration.id);
            assert_eq!(row.checksum, compute_checksum(migration.sql));
            assert_eq!(row.checksum.len(), 64);
        }
    }

    #[test]
    fn test_whitespace_edit_changes_checksum() {
        let sql = get_migrations()[0].sql;
        assert_ne!(compute_checksum(sql), compute_checksum(&format!("{sql}\n")));
    }
}
