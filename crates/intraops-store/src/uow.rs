//! Savepoint-based unit of work over a shared connection

use intraops_core::errors::{ExError, ExErrorKind};
use intraops_core::uow::UnitOfWork;

use crate::db::Database;
use crate::errors::from_rusqlite;

/// Unit of work backed by SQLite savepoints
///
/// Every `begin` opens a savepoint named after the nesting depth. The
/// outermost savepoint starts the transaction, so releasing it commits;
/// releasing an inner one merges its work into the enclosing scope.
/// `rollback` undoes and closes the innermost savepoint only.
///
/// Scopes are owned by the thread that opened them. A `begin` on another
/// thread waits until the outermost scope is closed.
#[derive(Clone)]
pub struct SqliteUnitOfWork {
    db: Database,
}

impl SqliteUnitOfWork {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Number of scopes the calling thread currently has open
    pub fn depth(&self) -> usize {
        self.db.with_scope(|scope, _| Ok(scope.depth())).unwrap_or(0)
    }
}

fn savepoint(depth: usize) -> String {
    format!("uow_{}", depth)
}

fn nothing_open(op: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op)
        .with_message("no open unit of work")
}

impl UnitOfWork for SqliteUnitOfWork {
    fn begin(&self) -> Result<(), ExError> {
        self.db.with_scope(|scope, conn| {
            let depth = scope.depth() + 1;
            conn.execute_batch(&format!("SAVEPOINT {}", savepoint(depth)))
                .map_err(from_rusqlite)?;
            scope.enter();
            tracing::trace!(depth, "unit of work opened");
            Ok(())
        })
    }

    fn commit(&self) -> Result<(), ExError> {
        self.db.with_scope(|scope, conn| {
            let depth = match scope.depth() {
                0 => return Err(nothing_open("uow_commit")),
                depth => depth,
            };
            conn.execute_batch(&format!("RELEASE SAVEPOINT {}", savepoint(depth)))
                .map_err(from_rusqlite)?;
            scope.leave();
            tracing::trace!(depth, "unit of work committed");
            Ok(())
        })
    }

    fn rollback(&self) -> Result<(), ExError> {
        self.db.with_scope(|scope, conn| {
            let depth = match scope.depth() {
                0 => return Err(nothing_open("uow_rollback")),
                depth => depth,
            };
            let name = savepoint(depth);
            // ROLLBACK TO keeps the savepoint open; RELEASE closes it
            conn.execute_batch(&format!(
                "ROLLBACK TO SAVEPOINT {name}; RELEASE SAVEPOINT {name}"
            ))
            .map_err(from_rusqlite)?;
            scope.leave();
            tracing::trace!(depth, "unit of work rolled back");
            Ok(())
        })
    }
}
