//! Read-side messages of the accounting slice

use super::commands::id_field;
use super::permissions::{ACCOUNT_GROUPS_READ, PAYMENT_TERMS_READ};
use super::views::{AccountGroupView, PaymentTermView};
use crate::cqs::{Message, Query};
use crate::paging::{ListOptions, Page};
use crate::security::Permission;
use crate::validation::rules::{Matches, MaxLength};
use crate::validation::{OptionalField, ValidationResult, Validator, ValidatorChain};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAccountGroup {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccountGroups {
    pub options: ListOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPaymentTerm {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPaymentTerms {
    pub options: ListOptions,
}

/// Oversized limits pass and are clamped by the repository
fn list_rules(options: &ListOptions, result: &mut ValidationResult) {
    ValidatorChain::new()
        .with(
            OptionalField::new("limit", |o: &ListOptions| o.limit.as_ref())
                .rule(Matches::new(|limit: &usize| *limit >= 1, "must be at least 1")),
        )
        .with(
            OptionalField::new("name_contains", |o: &ListOptions| o.name_contains.as_deref())
                .rule(MaxLength(100)),
        )
        .validate(options, result);
}

impl Message for GetAccountGroup {
    type Output = AccountGroupView;
    const NAME: &'static str = "account_group.get";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(ACCOUNT_GROUPS_READ)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        id_field(|q: &Self| q.id.as_str()).validate(self, result);
    }
}

impl Query for GetAccountGroup {}

impl Message for ListAccountGroups {
    type Output = Page<AccountGroupView>;
    const NAME: &'static str = "account_group.list";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(ACCOUNT_GROUPS_READ)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        list_rules(&self.options, result);
    }
}

impl Query for ListAccountGroups {}

impl Message for GetPaymentTerm {
    type Output = PaymentTermView;
    const NAME: &'static str = "payment_term.get";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(PAYMENT_TERMS_READ)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        id_field(|q: &Self| q.id.as_str()).validate(self, result);
    }
}

impl Query for GetPaymentTerm {}

impl Message for ListPaymentTerms {
    type Output = Page<PaymentTermView>;
    const NAME: &'static str = "payment_term.list";

    fn required_permissions(&self) -> Vec<Permission> {
        vec![Permission::new(PAYMENT_TERMS_READ)]
    }

    fn validate(&self, result: &mut ValidationResult) {
        list_rules(&self.options, result);
    }
}

impl Query for ListPaymentTerms {}
