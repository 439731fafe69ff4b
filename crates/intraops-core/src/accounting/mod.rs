//! Accounting master data: account groups and payment terms
//!
//! The slice exercises the whole stack: messages validate themselves,
//! services enforce uniqueness against a repository, and queries answer
//! with serialisable views.

pub mod commands;
pub mod handlers;
pub mod memory;
pub mod model;
pub mod permissions;
pub mod queries;
pub mod repository;
pub mod views;

pub use commands::{
    CreateAccountGroup, CreatePaymentTerm, DeleteAccountGroup, DeletePaymentTerm,
    UpdateAccountGroup, UpdatePaymentTerm,
};
pub use handlers::{register_accounting, AccountGroupService, PaymentTermService};
pub use memory::{InMemoryAccountGroups, InMemoryPaymentTerms};
pub use model::{AccountGroup, PaymentTerm};
pub use queries::{GetAccountGroup, GetPaymentTerm, ListAccountGroups, ListPaymentTerms};
pub use repository::{AccountGroupRepository, PaymentTermRepository};
pub use views::{AccountGroupView, PaymentTermView};
