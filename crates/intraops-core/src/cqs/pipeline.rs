use std::any::Any;
use std::sync::Arc;

use super::context::ExecutionContext;
use super::message::{Descriptor, Envelope};
use crate::errors::Result;

/// Handler output with its type erased so decorators stay object-safe
pub type Erased = Box<dyn Any + Send>;

/// Cross-cutting behaviour wrapped around handlers
pub trait Decorator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Consulted once per message type, when its handler is registered
    fn applies_to(&self, _descriptor: &Descriptor) -> bool {
        true
    }

    /// Run around the rest of the chain
    ///
    /// A decorator either calls `next.run(ctx)` exactly once or returns an
    /// error without calling it.
    ///
    /// # Errors
    ///
    /// The decorator's own refusal, or whatever the inner chain returned.
    fn invoke(&self, envelope: &dyn Envelope, ctx: &ExecutionContext, next: Next<'_>)
        -> Result<Erased>;
}

type Terminal<'a> = dyn Fn(&ExecutionContext) -> Result<Erased> + 'a;

/// The remainder of a decorator chain
pub struct Next<'a> {
    remaining: &'a [Arc<dyn Decorator>],
    envelope: &'a dyn Envelope,
    terminal: &'a Terminal<'a>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        chain: &'a [Arc<dyn Decorator>],
        envelope: &'a dyn Envelope,
        terminal: &'a Terminal<'a>,
    ) -> Self {
        Self {
            remaining: chain,
            envelope,
            terminal,
        }
    }

    /// Invoke the next decorator, or the handler once the chain is exhausted
    ///
    /// # Errors
    ///
    /// Propagates the inner result.
    pub fn run(self, ctx: &ExecutionContext) -> Result<Erased> {
        match self.remaining.split_first() {
            Some((head, rest)) => head.invoke(
                self.envelope,
                ctx,
                Next {
                    remaining: rest,
                    envelope: self.envelope,
                    terminal: self.terminal,
                },
            ),
            None => (self.terminal)(ctx),
        }
    }
}

/// Ordered registry of decorators; the first registered is outermost
#[derive(Clone, Default)]
pub struct Pipeline {
    decorators: Vec<Arc<dyn Decorator>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorators.push(Arc::new(decorator));
        self
    }

    pub fn push(&mut self, decorator: Arc<dyn Decorator>) {
        self.decorators.push(decorator);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.decorators.iter().map(|d| d.name()).collect()
    }

    /// Select the decorators that apply to one message type
    pub(crate) fn bind(&self, descriptor: &Descriptor) -> Vec<Arc<dyn Decorator>> {
        self.decorators
            .iter()
            .filter(|d| d.applies_to(descriptor))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
