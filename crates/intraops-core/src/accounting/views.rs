//! View models returned by accounting queries

use serde::Serialize;

use super::model::{AccountGroup, PaymentTerm};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountGroupView {
    pub id: String,
    pub number: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `"4000 - Revenue"`
    pub display_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AccountGroup> for AccountGroupView {
    fn from(group: &AccountGroup) -> Self {
        Self {
            id: group.id.clone(),
            number: group.number.clone(),
            name: group.name.clone(),
            description: group.description.clone(),
            display_name: format!("{} - {}", group.number, group.name),
            created_at: group.created_at.to_rfc3339(),
            updated_at: group.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentTermView {
    pub id: String,
    pub name: String,
    pub days_until_due: u32,
    pub discount_days: u32,
    pub discount_basis_points: u32,
    /// Basis points as a percentage with two decimals, e.g. `"2.50"`
    pub discount_percent: String,
    /// Human readable terms, e.g. `"2.00% within 10 days, net 30"`
    pub summary: String,
    pub created_at: String,
    pub updated_at: String,
}

fn percent(basis_points: u32) -> String {
    format!("{}.{:02}", basis_points / 100, basis_points % 100)
}

fn summary(term: &PaymentTerm) -> String {
    let net = match term.days_until_due {
        0 => "due on receipt".to_string(),
        days => format!("net {}", days),
    };
    if term.has_discount() {
        format!(
            "{}% within {} days, {}",
            percent(term.discount_basis_points),
            term.discount_days,
            net
        )
    } else {
        net
    }
}

impl From<&PaymentTerm> for PaymentTermView {
    fn from(term: &PaymentTerm) -> Self {
        Self {
            id: term.id.clone(),
            name: term.name.clone(),
            days_until_due: term.days_until_due,
            discount_days: term.discount_days,
            discount_basis_points: term.discount_basis_points,
            discount_percent: percent(term.discount_basis_points),
            summary: summary(term),
            created_at: term.created_at.to_rfc3339(),
            updated_at: term.updated_at.to_rfc3339(),
        }
    }
}
