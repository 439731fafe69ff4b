//! Unit of work seam used by the transaction decorator

use crate::errors::ExError;

/// Transaction boundary over the backing store
///
/// Scopes nest: a `begin` inside an open scope joins it, and only the
/// outermost `commit` makes the work durable. A `rollback` undoes the work
/// of the innermost open scope.
#[allow(clippy::result_large_err)]
pub trait UnitOfWork: Send + Sync {
    /// # Errors
    ///
    /// Returns `Persistence` if the store cannot open a scope.
    fn begin(&self) -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `Persistence` if the store rejects the commit.
    fn commit(&self) -> Result<(), ExError>;

    /// # Errors
    ///
    /// Returns `Persistence` if the store cannot roll back.
    fn rollback(&self) -> Result<(), ExError>;
}

/// Unit of work for stores without transactions (in-memory repositories)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUnitOfWork;

impl UnitOfWork for NoopUnitOfWork {
    fn begin(&self) -> Result<(), ExError> {
        Ok(())
    }

    fn commit(&self) -> Result<(), ExError> {
        Ok(())
    }

    fn rollback(&self) -> Result<(), ExError> {
        Ok(())
    }
}
