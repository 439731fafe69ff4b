use intraops_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::validation::FieldViolation;

/// Result type alias using the canonical error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure that leaves a bus is classified by one of these kinds. The
/// kind maps to a stable error code used by callers, tests and the CLI exit
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    ValidationFailed,

    // State
    NotFound,
    AlreadyExists,
    Conflict,

    // Security
    Unauthorised,
    Forbidden,

    // Execution control
    Cancelled,
    Timeout,

    // Dispatch wiring
    HandlerNotRegistered,
    DuplicateHandler,

    // Integration/IO
    Persistence,
    Serialization,
    Io,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::HandlerNotRegistered => "ERR_HANDLER_NOT_REGISTERED",
            ExErrorKind::DuplicateHandler => "ERR_DUPLICATE_HANDLER",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Refusals are failures raised by the pipeline itself before or instead
    /// of the handler doing any work.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            ExErrorKind::ValidationFailed
                | ExErrorKind::Unauthorised
                | ExErrorKind::Forbidden
                | ExErrorKind::Cancelled
                | ExErrorKind::Timeout
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    violations: Vec<FieldViolation>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            violations: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the field violations collected by a validation chain
    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field violations, empty unless the kind is `ValidationFailed`
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised by handlers and repositories
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Account group not found: {id}")]
    AccountGroupNotFound { id: String },

    #[error("Account group number already in use: {number}")]
    DuplicateAccountGroupNumber { number: String },

    #[error("Payment term not found: {id}")]
    PaymentTermNotFound { id: String },

    #[error("Payment term name already in use: {name}")]
    DuplicatePaymentTermName { name: String },

    /// The row changed or vanished between read and write
    #[error("Concurrent modification of {entity} {id}")]
    StaleWrite { entity: &'static str, id: String },

    #[error("Invalid cursor: {cursor}")]
    InvalidCursor { cursor: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<DomainError> for ExError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::AccountGroupNotFound { id } | DomainError::PaymentTermNotFound { id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(id)
                    .with_message(message)
            }
            DomainError::DuplicateAccountGroupNumber { number } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_entity_id(number)
                    .with_message(message)
            }
            DomainError::DuplicatePaymentTermName { name } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_entity_id(name)
                    .with_message(message)
            }
            DomainError::StaleWrite { id, .. } => ExError::new(ExErrorKind::Conflict)
                .with_entity_id(id)
                .with_message(message),
            DomainError::InvalidCursor { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            DomainError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization {
            message: err.to_string(),
        }
        .into()
    }
}
