use std::time::Instant;

use crate::cqs::context::ExecutionContext;
use crate::cqs::message::Envelope;
use crate::cqs::pipeline::{Decorator, Erased, Next};
use crate::errors::Result;
use crate::{log_op_end, log_op_error, log_op_rejected, log_op_start};

/// Emits start/end events around every dispatch
///
/// Pipeline refusals (denied, invalid, cancelled) are logged as `rejected`
/// at warn level; every other failure as `end_error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDecorator;

impl Decorator for LoggingDecorator {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn invoke(
        &self,
        envelope: &dyn Envelope,
        ctx: &ExecutionContext,
        next: Next<'_>,
    ) -> Result<Erased> {
        let descriptor = envelope.descriptor();
        let op = descriptor.name;
        let message_kind = descriptor.kind.as_str();
        let request_id = ctx.request().request_id.as_str();
        let user_id = ctx.principal().map(|p| p.user_id.as_str()).unwrap_or("-");

        let start = Instant::now();
        log_op_start!(
            op,
            message_kind = message_kind,
            request_id = request_id,
            user_id = user_id
        );

        let outcome = next.run(ctx);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    message_kind = message_kind,
                    request_id = request_id
                );
            }
            Err(err) if err.kind().is_refusal() => {
                log_op_rejected!(op, err, request_id = request_id, duration_ms = duration_ms);
            }
            Err(err) => {
                log_op_error!(op, err, duration_ms = duration_ms, request_id = request_id);
            }
        }
        outcome
    }
}
