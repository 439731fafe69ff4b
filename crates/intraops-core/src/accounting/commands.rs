//! Write-side messages of the accounting slice

use std::sync::OnceLock;

use super::permissions::{ACCOUNT_GROUPS_WRITE, PAYMENT_TERMS_WRITE};
use crate::cqs::{Command, Message};
use crate::security::Permission;
use crate::validation::rules::{Digits, MaxLength, NotBlank, Range};
use crate::validation::{Field, OptionalField, ValidationResult, Validator, ValidatorChain};

pub const MAX_NUMBER_LEN: usize = 10;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_DAYS_UNTIL_DUE: u32 = 365;
/// 100.00 %
pub const MAX_BASIS_POINTS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountGroup {
    pub number: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAccountGroup {
    pub id: String,
    pub number: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAccountGroup {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentTerm {
    pub name: String,
    pub days_until_due: u32,
    pub discount_days: u32,
    pub discount_basis_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePaymentTerm {
    pub id: String,
    pub name: String,
    pub days_until_due: u32,
    pub discount_days: u32,
    pub discount_basis_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePaymentTerm {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Shared field validators
// ---------------------------------------------------------------------------

pub(crate) fn id_field<T: 'static>(get: fn(&T) -> &str) -> Field<T, str> {
    Field::new("id", get).rule(NotBlank)
}

fn number_field<T: 'static>(get: fn(&T) -> &str) -> Field<T, str> {
    Field::new("number", get)
        .rule(NotBlank)
        .rule(Digits)
        .rule(MaxLength(MAX_NUMBER_LEN))
}

fn name_field<T: 'static>(get: fn(&T) -> &str) -> Field<T, str> {
    Field::new("name", get)
        .rule(NotBlank)
        .rule(MaxLength(MAX_NAME_LEN))
}

fn description_field<T: 'static>(get: fn(&T) -> Option<&str>) -> OptionalField<T, str> {
    OptionalField::new("description", get).rule(MaxLength(MAX_DESCRIPTION_LEN))
}

/// Fields shared by create and update of a payment term
trait TermFields {
    fn name(&self) -> &str;
    fn days_until_due(&self) -> &u32;
    fn discount_days(&self) -> &u32;
    fn discount_basis_points(&self) -> &u32;
}

macro_rules! impl_term_fields {
    ($($ty:ty),+) => {
        $(impl TermFields for $ty {
            fn name(&self) -> &str {
                &self.name
            }
            fn days_until_due(&self) -> &u32 {
                &self.days_until_due
            }
            fn discount_days(&self) -> &u32 {
                &self.discount_days
            }
            fn discount_basis_points(&self) -> &u32 {
                &self.discount_basis_points
            }
        })+
    };
}

impl_term_fields!(CreatePaymentTerm, UpdatePaymentTerm);

fn term_rules<T: TermFields + 'static>() -> ValidatorChain<T> {
    ValidatorChain::new()
        .with(name_field(T::name))
        .with(
            Field::new("days_until_due", T::days_until_due)
                .rule(Range::new(0, MAX_DAYS_UNTIL_DUE)),
        )
        .with(
            Field::new("discount_basis_points", T::discount_basis_points)
                .rule(Range::new(0, MAX_BASIS_POINTS)),
        )
        .check(
            "discount_days",
            |t: &T| t.discount_days() <= t.days_until_due(),
            "must not exceed days_until_due",
        )
        .check(
            "discount_basis_points",
            |t: &T| *t.discount_days() == 0 || *t.discount_basis_points() > 0,
            "must be greater than 0 when discount_days is set",
        )
}

// ---------------------------------------------------------------------------
// Message impls
// ---------------------------------------------------------------------------

impl Message for CreateAccountGroup {
    type Output = String;
    const NAME: &'static str = "account_group.create";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(ACCOUNT_GROUPS_WRITE)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        static RULES: OnceLock<ValidatorChain<CreateAccountGroup>> = OnceLock::new();
        RULES
            .get_or_init(|| {
                ValidatorChain::new()
                    .with(number_field(|c: &Self| c.number.as_str()))
                    .with(name_field(|c: &Self| c.name.as_str()))
                    .with(description_field(|c: &Self| c.description.as_deref()))
            })
            .validate(self, result);
    }
}

impl Command for CreateAccountGroup {}

impl Message for UpdateAccountGroup {
    type Output = ();
    const NAME: &'static str = "account_group.update";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(ACCOUNT_GROUPS_WRITE)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        static RULES: OnceLock<ValidatorChain<UpdateAccountGroup>> = OnceLock::new();
        RULES
            .get_or_init(|| {
                ValidatorChain::new()
                    .with(id_field(|c: &Self| c.id.as_str()))
                    .with(number_field(|c: &Self| c.number.as_str()))
                    .with(name_field(|c: &Self| c.name.as_str()))
                    .with(description_field(|c: &Self| c.description.as_deref()))
            })
            .validate(self, result);
    }
}

impl Command for UpdateAccountGroup {}

impl Message for DeleteAccountGroup {
    type Output = ();
    const NAME: &'static str = "account_group.delete";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(ACCOUNT_GROUPS_WRITE)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        id_field(|c: &Self| c.id.as_str()).validate(self, result);
    }
}

impl Command for DeleteAccountGroup {}

impl Message for CreatePaymentTerm {
    type Output = String;
    const NAME: &'static str = "payment_term.create";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(PAYMENT_TERMS_WRITE)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        static RULES: OnceLock<ValidatorChain<CreatePaymentTerm>> = OnceLock::new();
        RULES.get_or_init(term_rules).validate(self, result);
    }
}

impl Command for CreatePaymentTerm {}

impl Message for UpdatePaymentTerm {
    type Output = ();
    const NAME: &'static str = "payment_term.update";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(PAYMENT_TERMS_WRITE)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        static RULES: OnceLock<ValidatorChain<UpdatePaymentTerm>> = OnceLock::new();
        RULES
            .get_or_init(|| term_rules().with(id_field(|c: &Self| c.id.as_str())))
            .validate(self, result);
    }
}

impl Command for UpdatePaymentTerm {}

impl Message for DeletePaymentTerm {
    type Output = ();
    const NAME: &'static str = "payment_term.delete";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(PAYMENT_TERMS_WRITE)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        id_field(|c: &Self| c.id.as_str()).validate(self, result);
    }
}

impl Command for DeletePaymentTerm {}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations<M: Message>(message: &M) -> Vec<String> {
        let mut result = ValidationResult::new();
        message.validate(&mut result);
        result.violations().iter().map(|v| v.to_string()).collect()
    }

    fn term(days: u32, discount_days: u32, basis_points: u32) -> CreatePaymentTerm {
        CreatePaymentTerm {
            name: "2/10 net 30".to_string(),
            days_until_due: days,
            discount_days,
            discount_basis_points: basis_points,
        }
    }

    #[test]
    fn test_account_group_number_rules() {
        let mut cmd = CreateAccountGroup {
            number: "4000".to_string(),
            name: "Revenue".to_string(),
            description: None,
        };
        assert!(violations(&cmd).is_empty());

        cmd.number = "40a0".to_string();
        assert_eq!(violations(&cmd), vec!["number: must contain only digits"]);

        cmd.number = "12345678901".to_string();
        assert_eq!(
            violations(&cmd),
            vec!["number: must be at most 10 characters"]
        );
    }

    #[test]
    fn test_blank_fields_all_reported() {
        let cmd = UpdateAccountGroup {
            id: " ".to_string(),
            number: String::new(),
            name: String::new(),
            description: Some("x".repeat(501)),
        };
        let fields: Vec<String> = violations(&cmd)
            .into_iter()
            .map(|v| v.split(':').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(fields, vec!["id", "number", "name", "description"]);
    }

    #[test]
    fn test_payment_term_ranges() {
        assert!(violations(&term(30, 10, 200)).is_empty());
        assert_eq!(
            violations(&term(366, 0, 0)),
            vec!["days_until_due: must be between 0 and 365"]
        );
        assert_eq!(
            violations(&term(30, 0, 10_001)),
            vec!["discount_basis_points: must be between 0 and 10000"]
        );
    }

    #[test]
    fn test_payment_term_cross_field_rules() {
        assert_eq!(
            violations(&term(10, 20, 100)),
            vec!["discount_days: must not exceed days_until_due"]
        );
        assert_eq!(
            violations(&term(30, 10, 0)),
            vec!["discount_basis_points: must be greater than 0 when discount_days is set"]
        );
    }

    #[test]
    fn test_update_term_requires_id() {
        let cmd = UpdatePaymentTerm {
            id: String::new(),
            name: "Net 30".to_string(),
            days_until_due: 30,
            discount_days: 0,
            discount_basis_points: 0,
        };
        assert_eq!(violations(&cmd), vec!["id: must not be blank"]);
    }

    #[test]
    fn test_write_permissions() {
        let cmd = DeletePaymentTerm { id: "x".to_string() };
        assert_eq!(
            cmd.required_permissions(),
            vec![Permission::new(PAYMENT_TERMS_WRITE)]
        );
    }
}
