use std::sync::Arc;

use crate::cqs::context::ExecutionContext;
use crate::cqs::message::Envelope;
use crate::cqs::pipeline::{Decorator, Erased, Next};
use crate::errors::Result;
use crate::security::PermissionVerifier;

/// Verifies the caller holds every permission the message requires
pub struct PermissionDecorator {
    verifier: Arc<dyn PermissionVerifier>,
}

impl PermissionDecorator {
    pub fn new(verifier: Arc<dyn PermissionVerifier>) -> Self {
        Self { verifier }
    }
}

impl Decorator for PermissionDecorator {
    fn name(&self) -> &'static str {
        "permission"
    }

    fn invoke(
        &self,
        envelope: &dyn Envelope,
        ctx: &ExecutionContext,
        next: Next<'_>,
    ) -> Result<Erased> {
        let required = envelope.required_permissions();
        self.verifier
            .verify(ctx.principal(), &required)
            .map_err(|err| err.with_op(envelope.descriptor().name))?;
        next.run(ctx)
    }
}
