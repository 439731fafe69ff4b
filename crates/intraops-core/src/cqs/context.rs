use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use intraops_core_types::RequestContext;

use crate::errors::{ExError, ExErrorKind, Result};
use crate::security::Principal;

#[derive(Debug, Default)]
struct TokenState {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
}

/// Cooperative cancellation shared by every clone
///
/// Cancelling any clone cancels them all. A token may also carry a deadline,
/// after which it reports a timeout.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            state: Arc::new(TokenState {
                cancelled: AtomicBool::new(false),
                deadline: Some(deadline),
            }),
        }
    }

    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline
    }

    fn expired(&self) -> bool {
        self.state
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst) || self.expired()
    }

    /// Fail fast when cancelled or past the deadline
    ///
    /// # Errors
    ///
    /// `Cancelled` after `cancel()`, otherwise `Timeout` once the deadline
    /// has passed.
    pub fn check(&self, op: &str) -> Result<()> {
        if self.state.cancelled.load(Ordering::SeqCst) {
            return Err(ExError::new(ExErrorKind::Cancelled)
                .with_op(op)
                .with_message("operation was cancelled"));
        }
        if self.expired() {
            return Err(ExError::new(ExErrorKind::Timeout)
                .with_op(op)
                .with_message("operation deadline elapsed"));
        }
        Ok(())
    }
}

/// Ambient state of one dispatch
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    request: RequestContext,
    principal: Option<Arc<Principal>>,
    cancellation: CancellationToken,
}

impl ExecutionContext {
    /// Anonymous context with a fresh request id and a never-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(Arc::new(principal));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Context for a dispatch issued from inside a handler
    ///
    /// Same caller, same cancellation token, child correlation ids.
    pub fn child(&self) -> Self {
        Self {
            request: self.request.child(),
            principal: self.principal.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}
