//! Wiring of buses, pipeline and repositories

use std::sync::Arc;
use std::time::Duration;

use intraops_core::accounting::register_accounting;
use intraops_core::cqs::decorators::{
    CancellationDecorator, LoggingDecorator, PermissionDecorator, TransactionDecorator,
    ValidationDecorator,
};
use intraops_core::cqs::CancellationToken;
use intraops_core::errors::Result;
use intraops_core::security::GrantPermissionVerifier;
use intraops_core::{CommandBus, ExecutionContext, Pipeline, Principal, QueryBus};
use intraops_store::{Database, SqliteAccountGroups, SqlitePaymentTerms, SqliteUnitOfWork};

use crate::config::{AppConfig, PipelineConfig};

/// Everything a caller needs to dispatch messages
pub struct Services {
    pub commands: CommandBus,
    pub queries: QueryBus,
    db: Database,
    operator: Principal,
    timeout: Option<Duration>,
}

impl Services {
    /// Register every handler over `db` with the configured pipeline
    ///
    /// The database must already be migrated.
    ///
    /// # Errors
    ///
    /// `DuplicateHandler` if registration is inconsistent.
    pub fn build(db: Database, config: &AppConfig) -> Result<Self> {
        let pipeline = pipeline(&db, &config.pipeline);
        tracing::debug!(decorators = ?pipeline.names(), "pipeline assembled");

        let commands = CommandBus::new(pipeline.clone());
        let queries = QueryBus::new(pipeline);
        register_accounting(
            &commands,
            &queries,
            Arc::new(SqliteAccountGroups::new(db.clone())),
            Arc::new(SqlitePaymentTerms::new(db.clone())),
        )?;

        Ok(Self {
            commands,
            queries,
            db,
            operator: config.operator.principal(),
            timeout: config.pipeline.timeout_ms.map(Duration::from_millis),
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Context for one dispatch on behalf of the configured operator
    pub fn operator_context(&self) -> ExecutionContext {
        let ctx = ExecutionContext::new().with_principal(self.operator.clone());
        match self.timeout {
            Some(timeout) => ctx.with_cancellation(CancellationToken::with_timeout(timeout)),
            None => ctx,
        }
    }
}

/// Build the decorator pipeline selected by `config`
pub fn pipeline(db: &Database, config: &PipelineConfig) -> Pipeline {
    let mut pipeline = Pipeline::new();
    if config.logging {
        pipeline = pipeline.with(LoggingDecorator);
    }
    pipeline = pipeline.with(CancellationDecorator);
    if config.permissions {
        pipeline = pipeline.with(PermissionDecorator::new(Arc::new(GrantPermissionVerifier)));
    }
    if config.validation {
        pipeline = pipeline.with(ValidationDecorator);
    }
    if config.transactions {
        let unit_of_work = SqliteUnitOfWork::new(db.clone());
        pipeline = pipeline.with(TransactionDecorator::new(Arc::new(unit_of_work)));
    }
    pipeline
}
