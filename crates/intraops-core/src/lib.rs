//! IntraOps Core - command/query dispatch kernel
//!
//! This crate provides:
//! - The CQS buses and the decorator pipeline they dispatch through
//! - Composable field validation
//! - Principals, permissions and the unit-of-work seam
//! - The structured error and logging facilities shared by every crate
//! - The accounting reference slice (models, messages, handlers, views)

pub mod accounting;
pub mod cqs;
pub mod errors;
pub mod logging_facility;
pub mod paging;
pub mod security;
pub mod uow;
pub mod validation;

#[doc(hidden)]
pub use intraops_core_types as __core_types;

pub use cqs::{CommandBus, ExecutionContext, Pipeline, QueryBus};
pub use errors::{DomainError, ExError, ExErrorKind, Result};
pub use paging::{ListOptions, Page};
pub use security::{Permission, Principal};
