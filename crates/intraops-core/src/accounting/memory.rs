//! In-memory repositories for tests and throwaway runs

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::model::{AccountGroup, PaymentTerm};
use super::repository::{AccountGroupRepository, PaymentTermRepository};
use crate::errors::{DomainError, ExError, ExErrorKind, Result};
use crate::paging::{paginate, ListOptions, Page};

fn lock<'a, T>(
    rows: &'a Mutex<BTreeMap<String, T>>,
    op: &str,
) -> Result<MutexGuard<'a, BTreeMap<String, T>>> {
    rows.lock().map_err(|_| {
        ExError::new(ExErrorKind::Internal)
            .with_op(op)
            .with_message("in-memory table lock poisoned")
    })
}

#[derive(Debug, Default)]
pub struct InMemoryAccountGroups {
    rows: Mutex<BTreeMap<String, AccountGroup>>,
}

impl InMemoryAccountGroups {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountGroupRepository for InMemoryAccountGroups {
    fn insert(&self, group: &AccountGroup) -> Result<()> {
        lock(&self.rows, "insert_account_group")?.insert(group.id.clone(), group.clone());
        Ok(())
    }

    fn update(&self, group: &AccountGroup) -> Result<()> {
        let mut rows = lock(&self.rows, "update_account_group")?;
        match rows.get_mut(&group.id) {
            Some(row) => {
                *row = group.clone();
                Ok(())
            }
            None => Err(DomainError::StaleWrite {
                entity: "account_group",
                id: group.id.clone(),
            }
            .into()),
        }
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(lock(&self.rows, "delete_account_group")?.remove(id).is_some())
    }

    fn get(&self, id: &str) -> Result<Option<AccountGroup>> {
        Ok(lock(&self.rows, "get_account_group")?.get(id).cloned())
    }

    fn find_by_number(&self, number: &str) -> Result<Option<AccountGroup>> {
        Ok(lock(&self.rows, "find_account_group")?
            .values()
            .find(|g| g.number == number)
            .cloned())
    }

    fn list(&self, options: &ListOptions) -> Result<Page<AccountGroup>> {
        let rows = lock(&self.rows, "list_account_groups")?;
        paginate(
            rows.values().cloned(),
            options,
            |g| g.number.clone(),
            |g| g.name.as_str(),
        )
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPaymentTerms {
    rows: Mutex<BTreeMap<String, PaymentTerm>>,
}

impl InMemoryPaymentTerms {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentTermRepository for InMemoryPaymentTerms {
    fn insert(&self, term: &PaymentTerm) -> Result<()> {
        lock(&self.rows, "insert_payment_term")?.insert(term.id.clone(), term.clone());
        Ok(())
    }

    fn update(&self, term: &PaymentTerm) -> Result<()> {
        let mut rows = lock(&self.rows, "update_payment_term")?;
        match rows.get_mut(&term.id) {
            Some(row) => {
                *row = term.clone();
                Ok(())
            }
            None => Err(DomainError::StaleWrite {
                entity: "payment_term",
                id: term.id.clone(),
            }
            .into()),
        }
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(lock(&self.rows, "delete_payment_term")?.remove(id).is_some())
    }

    fn get(&self, id: &str) -> Result<Option<PaymentTerm>> {
        Ok(lock(&self.rows, "get_payment_term")?.get(id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<PaymentTerm>> {
        Ok(lock(&self.rows, "find_payment_term")?
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    fn list(&self, options: &ListOptions) -> Result<Page<PaymentTerm>> {
        let rows = lock(&self.rows, "list_payment_terms")?;
        paginate(
            rows.values().cloned(),
            options,
            |t| t.name.clone(),
            |t| t.name.as_str(),
        )
    }
}
