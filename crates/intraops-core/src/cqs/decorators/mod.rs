//! Stock decorators
//!
//! `standard_pipeline` wires them in the order the application expects:
//! logging sees every outcome, cancellation refuses before any check is
//! paid for, permissions are verified before input is inspected, and only
//! valid, authorised commands open a unit of work.

mod cancellation;
mod logging;
mod permission;
mod transaction;
mod validation;

pub use cancellation::CancellationDecorator;
pub use logging::LoggingDecorator;
pub use permission::PermissionDecorator;
pub use transaction::TransactionDecorator;
pub use validation::ValidationDecorator;

use std::sync::Arc;

use super::pipeline::Pipeline;
use crate::security::PermissionVerifier;
use crate::uow::UnitOfWork;

/// Logging, cancellation, permission, validation, transaction
///
/// ```
/// use std::sync::Arc;
///
/// use intraops_core::accounting::{
///     register_accounting, CreatePaymentTerm, InMemoryAccountGroups, InMemoryPaymentTerms,
/// };
/// use intraops_core::cqs::decorators::standard_pipeline;
/// use intraops_core::security::GrantPermissionVerifier;
/// use intraops_core::uow::NoopUnitOfWork;
/// use intraops_core::{CommandBus, ExecutionContext, Principal, QueryBus};
///
/// let pipeline = standard_pipeline(Arc::new(GrantPermissionVerifier), Arc::new(NoopUnitOfWork));
/// let commands = CommandBus::new(pipeline.clone());
/// let queries = QueryBus::new(pipeline);
/// register_accounting(
///     &commands,
///     &queries,
///     Arc::new(InMemoryAccountGroups::new()),
///     Arc::new(InMemoryPaymentTerms::new()),
/// )
/// .unwrap();
///
/// let ctx = ExecutionContext::new().with_principal(Principal::new("clerk").with_permission("accounting.*"));
/// let term = CreatePaymentTerm {
///     name: "Net 30".into(),
///     days_until_due: 30,
///     discount_days: 0,
///     discount_basis_points: 0,
/// };
/// assert!(commands.dispatch(&term, &ctx).is_ok());
/// ```
pub fn standard_pipeline(
    verifier: Arc<dyn PermissionVerifier>,
    unit_of_work: Arc<dyn UnitOfWork>,
) -> Pipeline {
    Pipeline::new()
        .with(LoggingDecorator)
        .with(CancellationDecorator)
        .with(PermissionDecorator::new(verifier))
        .with(ValidationDecorator)
        .with(TransactionDecorator::new(unit_of_work))
}
