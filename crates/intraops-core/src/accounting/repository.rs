//! Persistence seams for the accounting aggregates

use super::model::{AccountGroup, PaymentTerm};
use crate::errors::Result;
use crate::paging::{ListOptions, Page};

/// Account groups, listed in `number` order
pub trait AccountGroupRepository: Send + Sync {
    /// # Errors
    ///
    /// `Persistence` on store failure; uniqueness is checked by handlers.
    fn insert(&self, group: &AccountGroup) -> Result<()>;

    /// # Errors
    ///
    /// `Conflict` if the row no longer exists.
    fn update(&self, group: &AccountGroup) -> Result<()>;

    /// Returns whether a row was removed
    ///
    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn delete(&self, id: &str) -> Result<bool>;

    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn get(&self, id: &str) -> Result<Option<AccountGroup>>;

    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn find_by_number(&self, number: &str) -> Result<Option<AccountGroup>>;

    /// # Errors
    ///
    /// `InvalidInput` for a bad cursor, `Persistence` on store failure.
    fn list(&self, options: &ListOptions) -> Result<Page<AccountGroup>>;
}

/// Payment terms, listed in `name` order
pub trait PaymentTermRepository: Send + Sync {
    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn insert(&self, term: &PaymentTerm) -> Result<()>;

    /// # Errors
    ///
    /// `Conflict` if the row no longer exists.
    fn update(&self, term: &PaymentTerm) -> Result<()>;

    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn delete(&self, id: &str) -> Result<bool>;

    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn get(&self, id: &str) -> Result<Option<PaymentTerm>>;

    /// # Errors
    ///
    /// `Persistence` on store failure.
    fn find_by_name(&self, name: &str) -> Result<Option<PaymentTerm>>;

    /// # Errors
    ///
    /// `InvalidInput` for a bad cursor, `Persistence` on store failure.
    fn list(&self, options: &ListOptions) -> Result<Page<PaymentTerm>>;
}
