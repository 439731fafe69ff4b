use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::context::ExecutionContext;
use super::handler::Handler;
use super::message::{Command, Descriptor, Message, MessageKind, Query, Sealed, TransactionScope};
use super::pipeline::{Decorator, Erased, Next, Pipeline};
use crate::errors::{ExError, ExErrorKind, Result};

struct Bound<M: Message> {
    descriptor: Descriptor,
    handler: Arc<dyn Handler<M>>,
    chain: Vec<Arc<dyn Decorator>>,
}

/// What a bus knows about one registered message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub descriptor: Descriptor,
    /// Bound decorators, outermost first
    pub decorators: Vec<&'static str>,
}

struct Slot {
    binding: Binding,
    bound: Arc<dyn Any + Send + Sync>,
}

/// Type-keyed handler table shared by both buses
struct Registry {
    pipeline: Pipeline,
    slots: RwLock<HashMap<TypeId, Slot>>,
}

impl Registry {
    fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            slots: RwLock::new(HashMap::new()),
        }
    }

    fn register<M: Message>(
        &self,
        descriptor: Descriptor,
        handler: Arc<dyn Handler<M>>,
    ) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned(M::NAME))?;
        if slots.contains_key(&TypeId::of::<M>()) {
            return Err(ExError::new(ExErrorKind::DuplicateHandler)
                .with_op(M::NAME)
                .with_message("a handler is already registered for this message"));
        }

        let chain = self.pipeline.bind(&descriptor);
        let binding = Binding {
            descriptor: descriptor.clone(),
            decorators: chain.iter().map(|d| d.name()).collect(),
        };
        tracing::debug!(
            op = M::NAME,
            message_kind = descriptor.kind.as_str(),
            decorators = ?binding.decorators,
            "handler registered"
        );
        let bound: Arc<dyn Any + Send + Sync> = Arc::new(Bound {
            descriptor,
            handler,
            chain,
        });
        slots.insert(TypeId::of::<M>(), Slot { binding, bound });
        Ok(())
    }

    fn lookup<M: Message>(&self) -> Result<Arc<Bound<M>>> {
        let slots = self.slots.read().map_err(|_| poisoned(M::NAME))?;
        let slot = slots.get(&TypeId::of::<M>()).ok_or_else(|| {
            ExError::new(ExErrorKind::HandlerNotRegistered)
                .with_op(M::NAME)
                .with_message("no handler registered for this message")
        })?;
        slot.bound
            .clone()
            .downcast::<Bound<M>>()
            .map_err(|_| internal(M::NAME, "handler table entry has the wrong type"))
    }

    fn dispatch<M: Message>(&self, message: &M, ctx: &ExecutionContext) -> Result<M::Output> {
        let bound = self
            .lookup::<M>()
            .map_err(|err| with_dispatch_context(err, M::NAME, ctx))?;
        let envelope = Sealed {
            descriptor: &bound.descriptor,
            message,
        };
        let handler = &bound.handler;
        let terminal = |ctx: &ExecutionContext| -> Result<Erased> {
            handler
                .handle(message, ctx)
                .map(|output| Box::new(output) as Erased)
        };

        let outcome = Next::new(&bound.chain, &envelope, &terminal).run(ctx);
        outcome
            .and_then(|erased| {
                erased
                    .downcast::<M::Output>()
                    .map(|output| *output)
                    .map_err(|_| internal(M::NAME, "decorator replaced the handler output type"))
            })
            .map_err(|err| with_dispatch_context(err, M::NAME, ctx))
    }

    fn bindings(&self) -> Vec<Binding> {
        let Ok(slots) = self.slots.read() else {
            return Vec::new();
        };
        let mut bindings: Vec<Binding> = slots.values().map(|s| s.binding.clone()).collect();
        bindings.sort_by_key(|b| b.descriptor.name);
        bindings
    }
}

fn poisoned(op: &str) -> ExError {
    internal(op, "handler table lock poisoned")
}

fn internal(op: &str, message: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op)
        .with_message(message)
}

/// Stamp the operation and correlation ids onto errors leaving the bus
fn with_dispatch_context(mut err: ExError, op: &'static str, ctx: &ExecutionContext) -> ExError {
    if err.op().is_none() {
        err = err.with_op(op);
    }
    if err.request_id().is_none() {
        err = err.with_request_id(ctx.request().request_id.clone());
    }
    if err.trace_id().is_none() {
        if let Some(trace_id) = &ctx.request().trace_id {
            err = err.with_trace_id(trace_id.clone());
        }
    }
    err
}

/// Dispatches commands to their single handler through the pipeline
pub struct CommandBus {
    registry: Registry,
}

impl CommandBus {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            registry: Registry::new(pipeline),
        }
    }

    /// # Errors
    ///
    /// `DuplicateHandler` if `C` already has a handler.
    pub fn register<C, H>(&self, handler: H) -> Result<()>
    where
        C: Command,
        H: Handler<C> + 'static,
    {
        let descriptor = Descriptor {
            name: C::NAME,
            kind: MessageKind::Command,
            transaction: C::TRANSACTION,
        };
        self.registry.register::<C>(descriptor, Arc::new(handler))
    }

    /// # Errors
    ///
    /// `HandlerNotRegistered`, any decorator refusal, or the handler's error.
    pub fn dispatch<C: Command>(&self, command: &C, ctx: &ExecutionContext) -> Result<C::Output> {
        self.registry.dispatch(command, ctx)
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.registry.bindings()
    }
}

/// Dispatches queries to their single handler through the pipeline
pub struct QueryBus {
    registry: Registry,
}

impl QueryBus {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            registry: Registry::new(pipeline),
        }
    }

    /// # Errors
    ///
    /// `DuplicateHandler` if `Q` already has a handler.
    pub fn register<Q, H>(&self, handler: H) -> Result<()>
    where
        Q: Query,
        H: Handler<Q> + 'static,
    {
        let descriptor = Descriptor {
            name: Q::NAME,
            kind: MessageKind::Query,
            transaction: TransactionScope::Suppress,
        };
        self.registry.register::<Q>(descriptor, Arc::new(handler))
    }

    /// # Errors
    ///
    /// `HandlerNotRegistered`, any decorator refusal, or the handler's error.
    pub fn ask<Q: Query>(&self, query: &Q, ctx: &ExecutionContext) -> Result<Q::Output> {
        self.registry.dispatch(query, ctx)
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.registry.bindings()
    }
}
