//! Validation chain
//!
//! A `ValidatorChain<T>` is an ordered list of validators. The usual member
//! is a `Field`, which projects one field out of `T` and runs a list of
//! `Rule` sub-validators against it. Chains never short-circuit: every
//! violation is collected so a caller can fix all of them in one round trip.
//!
//! ```
//! use intraops_core::validation::{rules, Field, ValidationResult, Validator, ValidatorChain};
//!
//! struct Rename { name: String }
//!
//! let chain = ValidatorChain::new()
//!     .with(Field::new("name", |r: &Rename| r.name.as_str())
//!         .rule(rules::NotBlank)
//!         .rule(rules::MaxLength(10)));
//!
//! let mut result = ValidationResult::new();
//! chain.validate(&Rename { name: " ".into() }, &mut result);
//! assert_eq!(result.violations().len(), 1);
//! ```

mod result;
pub mod rules;
mod validator;

pub use result::{FieldViolation, ValidationResult};
pub use rules::Rule;
pub use validator::{Field, OptionalField, Validator, ValidatorChain};
