//! Command/query dispatch pipeline
//!
//! Commands (writes) go through a [`CommandBus`], queries (reads) through a
//! [`QueryBus`]. Each message type has exactly one [`Handler`]. At
//! registration time the bus binds the decorators of its [`Pipeline`] whose
//! `applies_to` accepts the message's [`Descriptor`]; at dispatch time the
//! bound decorators run outermost-first around the handler.
//!
//! ```
//! use intraops_core::cqs::{handler_fn, Command, CommandBus, ExecutionContext, Message, Pipeline};
//!
//! struct Ping;
//! impl Message for Ping {
//!     type Output = &'static str;
//!     const NAME: &'static str = "ping";
//! }
//! impl Command for Ping {}
//!
//! let bus = CommandBus::new(Pipeline::new());
//! bus.register::<Ping, _>(handler_fn(|_: &Ping, _: &ExecutionContext| Ok("pong")))
//!     .unwrap();
//! assert_eq!(bus.dispatch(&Ping, &ExecutionContext::new()).unwrap(), "pong");
//! ```

mod bus;
mod context;
pub mod decorators;
mod handler;
mod message;
mod pipeline;

pub use bus::{Binding, CommandBus, QueryBus};
pub use context::{CancellationToken, ExecutionContext};
pub use handler::{handler_fn, FnHandler, Handler};
pub use message::{Command, Descriptor, Envelope, Message, MessageKind, Query, TransactionScope};
pub use pipeline::{Decorator, Erased, Next, Pipeline};
