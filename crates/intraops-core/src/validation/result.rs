use serde::Serialize;

use crate::errors::{ExError, ExErrorKind};

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulates violations in the order validators report them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Violations reported against one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// Convert into a `ValidationFailed` error when anything was reported
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::ValidationFailed` carrying every violation.
    pub fn into_result(self, op: &str) -> Result<(), ExError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let message = match self.violations.len() {
            1 => "1 validation error".to_string(),
            n => format!("{} validation errors", n),
        };
        Err(ExError::new(ExErrorKind::ValidationFailed)
            .with_op(op)
            .with_message(message)
            .with_violations(self.violations))
    }
}
