//! Schema migration command

use intraops_core::errors::Result;
use intraops_store::migrations::applied_migrations;
use serde_json::json;

use super::{connect, print_json, GlobalArgs};

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let (config, db) = connect(global)?;
    let newly_applied = db.migrate()?;
    let recorded = db.with_conn(|conn| applied_migrations(conn))?;

    let migrations: Vec<_> = recorded
        .iter()
        .map(|m| {
            json!({
                "id": m.migration_id,
                "applied_at": m.applied_at,
                "checksum": m.checksum,
            })
        })
        .collect();
    print_json(&json!({
        "database": config.database_path.display().to_string(),
        "applied": newly_applied,
        "migrations": migrations,
    }))
}
