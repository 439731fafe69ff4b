use super::context::ExecutionContext;
use super::message::Message;
use crate::errors::Result;

/// Executes one message type
pub trait Handler<M: Message>: Send + Sync {
    /// # Errors
    ///
    /// Any `ExError`; the bus adds operation and request context.
    fn handle(&self, message: &M, ctx: &ExecutionContext) -> Result<M::Output>;
}

/// Adapter turning a closure into a handler
pub struct FnHandler<F>(F);

/// Wrap a closure as a handler
pub fn handler_fn<F>(f: F) -> FnHandler<F> {
    FnHandler(f)
}

impl<M, F> Handler<M> for FnHandler<F>
where
    M: Message,
    F: Fn(&M, &ExecutionContext) -> Result<M::Output> + Send + Sync,
{
    fn handle(&self, message: &M, ctx: &ExecutionContext) -> Result<M::Output> {
        (self.0)(message, ctx)
    }
}
