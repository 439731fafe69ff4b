//! Correlation types for request tracking
//!
//! Every dispatch through a command or query bus carries a `RequestContext`.
//! Nested dispatches derive a child context that keeps the trace id and gets
//! a fresh request id, so log lines of one user action can be stitched
//! together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new time-ordered identifier (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Adopt an identifier received from a caller
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifier of a single dispatched command or query
    RequestId
);

correlation_id!(
    /// Identifier shared by every dispatch that belongs to one caller action
    TraceId
);

/// Context carried through dispatch boundaries for correlation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: None,
        }
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    /// Add a TraceId to the context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Derive the context of a nested dispatch.
    ///
    /// The child gets its own request id. The trace id is inherited; a root
    /// context without one donates its request id as the trace id so parent
    /// and child stay linked.
    pub fn child(&self) -> Self {
        let trace_id = self
            .trace_id
            .clone()
            .unwrap_or_else(|| TraceId::from_string(self.request_id.as_str()));
        Self {
            request_id: RequestId::new(),
            trace_id: Some(trace_id),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
