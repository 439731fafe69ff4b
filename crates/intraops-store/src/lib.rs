//! IntraOps Store - SQLite persistence
//!
//! Provides:
//! - A shared connection handle with embedded, checksummed migrations
//! - SQLite implementations of the accounting repositories
//! - A savepoint-based unit of work for the transaction decorator

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod uow;

// Re-export key types
pub use db::Database;
pub use errors::Result;
pub use repo::{SqliteAccountGroups, SqlitePaymentTerms};
pub use uow::SqliteUnitOfWork;
