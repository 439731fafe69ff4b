use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A numbered group of ledger accounts (e.g. `4000 Revenue`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGroup {
    pub id: String,
    /// Chart-of-accounts number, unique, digits only
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountGroup {
    pub fn new(number: String, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            number,
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Terms of payment printed on invoices
///
/// A discount of `discount_basis_points` (1/100 of a percent) applies when
/// paid within `discount_days`; the full amount is due after
/// `days_until_due`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTerm {
    pub id: String,
    pub name: String,
    pub days_until_due: u32,
    pub discount_days: u32,
    pub discount_basis_points: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentTerm {
    pub fn new(
        name: String,
        days_until_due: u32,
        discount_days: u32,
        discount_basis_points: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            name,
            days_until_due,
            discount_days,
            discount_basis_points,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount_basis_points > 0
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
