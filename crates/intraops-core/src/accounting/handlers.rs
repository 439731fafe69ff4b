//! Command and query handlers of the accounting slice
//!
//! Each service owns one repository and handles every message about its
//! aggregate. Input has already been validated by the pipeline; the
//! handlers enforce the rules that need stored state.

use std::sync::Arc;

use super::commands::{
    CreateAccountGroup, CreatePaymentTerm, DeleteAccountGroup, DeletePaymentTerm,
    UpdateAccountGroup, UpdatePaymentTerm,
};
use super::model::{AccountGroup, PaymentTerm};
use super::queries::{GetAccountGroup, GetPaymentTerm, ListAccountGroups, ListPaymentTerms};
use super::repository::{AccountGroupRepository, PaymentTermRepository};
use super::views::{AccountGroupView, PaymentTermView};
use crate::cqs::{CommandBus, ExecutionContext, Handler, QueryBus};
use crate::errors::{DomainError, Result};
use crate::paging::Page;

#[derive(Clone)]
pub struct AccountGroupService {
    repo: Arc<dyn AccountGroupRepository>,
}

impl AccountGroupService {
    pub fn new(repo: Arc<dyn AccountGroupRepository>) -> Self {
        Self { repo }
    }

    fn load(&self, id: &str) -> Result<AccountGroup> {
        self.repo.get(id)?.ok_or_else(|| {
            DomainError::AccountGroupNotFound { id: id.to_string() }.into()
        })
    }

    fn ensure_number_free(&self, number: &str, owner: Option<&str>) -> Result<()> {
        match self.repo.find_by_number(number)? {
            Some(existing) if Some(existing.id.as_str()) != owner => {
                Err(DomainError::DuplicateAccountGroupNumber {
                    number: number.to_string(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

fn normalize_description(description: &Option<String>) -> Option<String> {
    description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

impl Handler<CreateAccountGroup> for AccountGroupService {
    fn handle(&self, cmd: &CreateAccountGroup, _ctx: &ExecutionContext) -> Result<String> {
        let number = cmd.number.trim();
        self.ensure_number_free(number, None)?;

        let group = AccountGroup::new(
            number.to_string(),
            cmd.name.trim().to_string(),
            normalize_description(&cmd.description),
        );
        self.repo.insert(&group)?;
        tracing::debug!(entity_id = %group.id, number = %group.number, "account group created");
        Ok(group.id)
    }
}

impl Handler<UpdateAccountGroup> for AccountGroupService {
    fn handle(&self, cmd: &UpdateAccountGroup, _ctx: &ExecutionContext) -> Result<()> {
        let mut group = self.load(&cmd.id)?;
        let number = cmd.number.trim();
        self.ensure_number_free(number, Some(&group.id))?;

        group.number = number.to_string();
        group.name = cmd.name.trim().to_string();
        group.description = normalize_description(&cmd.description);
        group.touch();
        self.repo.update(&group)
    }
}

impl Handler<DeleteAccountGroup> for AccountGroupService {
    fn handle(&self, cmd: &DeleteAccountGroup, _ctx: &ExecutionContext) -> Result<()> {
        if self.repo.delete(&cmd.id)? {
            Ok(())
        } else {
            Err(DomainError::AccountGroupNotFound { id: cmd.id.clone() }.into())
        }
    }
}

impl Handler<GetAccountGroup> for AccountGroupService {
    fn handle(&self, query: &GetAccountGroup, _ctx: &ExecutionContext) -> Result<AccountGroupView> {
        self.load(&query.id).map(|group| AccountGroupView::from(&group))
    }
}

impl Handler<ListAccountGroups> for AccountGroupService {
    fn handle(
        &self,
        query: &ListAccountGroups,
        _ctx: &ExecutionContext,
    ) -> Result<Page<AccountGroupView>> {
        Ok(self
            .repo
            .list(&query.options)?
            .map(|group| AccountGroupView::from(&group)))
    }
}

#[derive(Clone)]
pub struct PaymentTermService {
    repo: Arc<dyn PaymentTermRepository>,
}

impl PaymentTermService {
    pub fn new(repo: Arc<dyn PaymentTermRepository>) -> Self {
        Self { repo }
    }

    fn load(&self, id: &str) -> Result<PaymentTerm> {
        self.repo
            .get(id)?
            .ok_or_else(|| DomainError::PaymentTermNotFound { id: id.to_string() }.into())
    }

    fn ensure_name_free(&self, name: &str, owner: Option<&str>) -> Result<()> {
        match self.repo.find_by_name(name)? {
            Some(existing) if Some(existing.id.as_str()) != owner => {
                Err(DomainError::DuplicatePaymentTermName {
                    name: name.to_string(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

impl Handler<CreatePaymentTerm> for PaymentTermService {
    fn handle(&self, cmd: &CreatePaymentTerm, _ctx: &ExecutionContext) -> Result<String> {
        let name = cmd.name.trim();
        self.ensure_name_free(name, None)?;

        let term = PaymentTerm::new(
            name.to_string(),
            cmd.days_until_due,
            cmd.discount_days,
            cmd.discount_basis_points,
        );
        self.repo.insert(&term)?;
        tracing::debug!(entity_id = %term.id, name = %term.name, "payment term created");
        Ok(term.id)
    }
}

impl Handler<UpdatePaymentTerm> for PaymentTermService {
    fn handle(&self, cmd: &UpdatePaymentTerm, _ctx: &ExecutionContext) -> Result<()> {
        let mut term = self.load(&cmd.id)?;
        let name = cmd.name.trim();
        self.ensure_name_free(name, Some(&term.id))?;

        term.name = name.to_string();
        term.days_until_due = cmd.days_until_due;
        term.discount_days = cmd.discount_days;
        term.discount_basis_points = cmd.discount_basis_points;
        term.touch();
        self.repo.update(&term)
    }
}

impl Handler<DeletePaymentTerm> for PaymentTermService {
    fn handle(&self, cmd: &DeletePaymentTerm, _ctx: &ExecutionContext) -> Result<()> {
        if self.repo.delete(&cmd.id)? {
            Ok(())
        } else {
            Err(DomainError::PaymentTermNotFound { id: cmd.id.clone() }.into())
        }
    }
}

impl Handler<GetPaymentTerm> for PaymentTermService {
    fn handle(&self, query: &GetPaymentTerm, _ctx: &ExecutionContext) -> Result<PaymentTermView> {
        self.load(&query.id).map(|term| PaymentTermView::from(&term))
    }
}

impl Handler<ListPaymentTerms> for PaymentTermService {
    fn handle(
        &self,
        query: &ListPaymentTerms,
        _ctx: &ExecutionContext,
    ) -> Result<Page<PaymentTermView>> {
        Ok(self
            .repo
            .list(&query.options)?
            .map(|term| PaymentTermView::from(&term)))
    }
}

/// Register every accounting handler on the given buses
///
/// # Errors
///
/// `DuplicateHandler` if any accounting message is already registered.
pub fn register_accounting(
    commands: &CommandBus,
    queries: &QueryBus,
    account_groups: Arc<dyn AccountGroupRepository>,
    payment_terms: Arc<dyn PaymentTermRepository>,
) -> Result<()> {
    let groups = AccountGroupService::new(account_groups);
    commands.register::<CreateAccountGroup, _>(groups.clone())?;
    commands.register::<UpdateAccountGroup, _>(groups.clone())?;
    commands.register::<DeleteAccountGroup, _>(groups.clone())?;
    queries.register::<GetAccountGroup, _>(groups.clone())?;
    queries.register::<ListAccountGroups, _>(groups)?;

    let terms = PaymentTermService::new(payment_terms);
    commands.register::<CreatePaymentTerm, _>(terms.clone())?;
    commands.register::<UpdatePaymentTerm, _>(terms.clone())?;
    commands.register::<DeletePaymentTerm, _>(terms.clone())?;
    queries.register::<GetPaymentTerm, _>(terms.clone())?;
    queries.register::<ListPaymentTerms, _>(terms)?;
    Ok(())
}
