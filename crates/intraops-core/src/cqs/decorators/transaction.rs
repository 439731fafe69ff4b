use std::sync::Arc;

use crate::cqs::context::ExecutionContext;
use crate::cqs::message::{Descriptor, Envelope, TransactionScope};
use crate::cqs::pipeline::{Decorator, Erased, Next};
use crate::errors::Result;
use crate::uow::UnitOfWork;

/// Runs messages with `TransactionScope::Required` inside a unit of work
///
/// Commits on success, rolls back on error. A token cancelled while the
/// handler ran also rolls back.
pub struct TransactionDecorator {
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl TransactionDecorator {
    pub fn new(unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self { unit_of_work }
    }

    fn rollback_after(&self, op: &str, cause: &str) {
        if let Err(err) = self.unit_of_work.rollback() {
            tracing::warn!(op, cause, err_code = err.code(), "rollback failed");
        }
    }
}

impl Decorator for TransactionDecorator {
    fn name(&self) -> &'static str {
        "transaction"
    }

    fn applies_to(&self, descriptor: &Descriptor) -> bool {
        descriptor.transaction == TransactionScope::Required
    }

    fn invoke(
        &self,
        envelope: &dyn Envelope,
        ctx: &ExecutionContext,
        next: Next<'_>,
    ) -> Result<Erased> {
        let op = envelope.descriptor().name;
        self.unit_of_work.begin()?;

        let output = match next.run(ctx) {
            Ok(output) => output,
            Err(err) => {
                self.rollback_after(op, err.code());
                return Err(err);
            }
        };

        if let Err(err) = ctx.cancellation().check(op) {
            self.rollback_after(op, err.code());
            return Err(err);
        }

        self.unit_of_work.commit()?;
        Ok(output)
    }
}
