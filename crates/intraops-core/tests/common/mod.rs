use std::sync::{Arc, Mutex};

use intraops_core::accounting::{register_accounting, InMemoryAccountGroups, InMemoryPaymentTerms};
use intraops_core::cqs::decorators::standard_pipeline;
use intraops_core::errors::ExError;
use intraops_core::security::GrantPermissionVerifier;
use intraops_core::uow::UnitOfWork;
use intraops_core::{CommandBus, ExecutionContext, Principal, QueryBus};

/// Unit of work that records every call instead of touching a store
#[derive(Default)]
pub struct RecordingUnitOfWork {
    calls: Mutex<Vec<&'static str>>,
}

#[allow(dead_code)]
impl RecordingUnitOfWork {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl UnitOfWork for RecordingUnitOfWork {
    fn begin(&self) -> Result<(), ExError> {
        self.record("begin");
        Ok(())
    }

    fn commit(&self) -> Result<(), ExError> {
        self.record("commit");
        Ok(())
    }

    fn rollback(&self) -> Result<(), ExError> {
        self.record("rollback");
        Ok(())
    }
}

/// Caller holding every permission
#[allow(dead_code)]
pub fn admin_ctx() -> ExecutionContext {
    ExecutionContext::new().with_principal(Principal::new("admin").with_permission("*"))
}

#[allow(dead_code)]
pub fn ctx_with(permissions: &[&str]) -> ExecutionContext {
    let principal = permissions
        .iter()
        .fold(Principal::new("clerk"), |p, perm| p.with_permission(*perm));
    ExecutionContext::new().with_principal(principal)
}

/// Buses wired with the standard pipeline over in-memory repositories
#[allow(dead_code)]
pub fn accounting_buses() -> (CommandBus, QueryBus, Arc<RecordingUnitOfWork>) {
    let uow = Arc::new(RecordingUnitOfWork::default());
    let pipeline = standard_pipeline(Arc::new(GrantPermissionVerifier), uow.clone());
    let commands = CommandBus::new(pipeline.clone());
    let queries = QueryBus::new(pipeline);
    register_accounting(
        &commands,
        &queries,
        Arc::new(InMemoryAccountGroups::new()),
        Arc::new(InMemoryPaymentTerms::new()),
    )
    .unwrap();
    (commands, queries, uow)
}
