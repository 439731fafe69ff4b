use std::any::Any;

use crate::security::Permission;
use crate::validation::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Command,
    Query,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Command => "command",
            MessageKind::Query => "query",
        }
    }
}

/// Whether a message runs inside a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionScope {
    /// Join the ambient scope, or open one
    Required,
    /// Run without a scope
    Suppress,
}

/// Static facts about a registered message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: &'static str,
    pub kind: MessageKind,
    pub transaction: TransactionScope,
}

/// Anything that can be dispatched through a bus
pub trait Message: Send + Sync + 'static {
    type Output: Send + 'static;

    /// Stable operation name used for logging and error context
    const NAME: &'static str;

    fn required_permissions(&self) -> Vec<Permission> {
        Vec::new()
    }

    /// Report every input problem; the handler never sees an invalid message
    fn validate(&self, _result: &mut ValidationResult) {}
}

/// A state-changing message
pub trait Command: Message {
    const TRANSACTION: TransactionScope = TransactionScope::Required;
}

/// A read-only message
pub trait Query: Message {}

/// Type-erased view of a message handed to decorators
pub trait Envelope: Send + Sync {
    fn descriptor(&self) -> &Descriptor;
    fn required_permissions(&self) -> Vec<Permission>;
    fn validate(&self, result: &mut ValidationResult);
    fn as_any(&self) -> &dyn Any;
}

pub(crate) struct Sealed<'a, M> {
    pub(crate) descriptor: &'a Descriptor,
    pub(crate) message: &'a M,
}

impl<M: Message> Envelope for Sealed<'_, M> {
    fn descriptor(&self) -> &Descriptor {
        self.descriptor
    }

    fn required_permissions(&self) -> Vec<Permission> {
        self.message.required_permissions()
    }

    fn validate(&self, result: &mut ValidationResult) {
        self.message.validate(result);
    }

    fn as_any(&self) -> &dyn Any {
        self.message
    }
}
