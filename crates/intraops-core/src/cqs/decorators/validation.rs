use crate::cqs::context::ExecutionContext;
use crate::cqs::message::Envelope;
use crate::cqs::pipeline::{Decorator, Erased, Next};
use crate::errors::Result;
use crate::validation::ValidationResult;

/// Runs the message's validation chain; the handler only sees valid input
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationDecorator;

impl Decorator for ValidationDecorator {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn invoke(
        &self,
        envelope: &dyn Envelope,
        ctx: &ExecutionContext,
        next: Next<'_>,
    ) -> Result<Erased> {
        let mut result = ValidationResult::new();
        envelope.validate(&mut result);
        result.into_result(envelope.descriptor().name)?;
        next.run(ctx)
    }
}
