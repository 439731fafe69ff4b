use crate::cqs::context::ExecutionContext;
use crate::cqs::message::Envelope;
use crate::cqs::pipeline::{Decorator, Erased, Next};
use crate::errors::Result;

/// Refuses to start work whose token is already cancelled or expired
///
/// Handlers that loop can call `ctx.cancellation().check(..)` themselves;
/// the transaction decorator re-checks before committing.
#[derive(Debug, Default, Clone, Copy)]
pub struct CancellationDecorator;

impl Decorator for CancellationDecorator {
    fn name(&self) -> &'static str {
        "cancellation"
    }

    fn invoke(
        &self,
        envelope: &dyn Envelope,
        ctx: &ExecutionContext,
        next: Next<'_>,
    ) -> Result<Erased> {
        ctx.cancellation().check(envelope.descriptor().name)?;
        next.run(ctx)
    }
}
