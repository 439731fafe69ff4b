//! SQLite implementations of the accounting repositories

mod account_groups;
mod payment_terms;

pub use account_groups::SqliteAccountGroups;
pub use payment_terms::SqlitePaymentTerms;

use chrono::{DateTime, TimeZone, Utc};

use crate::errors::{corrupt_row, Result};

/// Timestamps are stored as Unix milliseconds
pub(crate) fn to_millis(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(table: &str, id: &str, millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| corrupt_row(table, id, &format!("timestamp {} out of range", millis)))
}

/// `LIMIT` bound for a keyset page; one extra row detects a following page
pub(crate) fn overshoot(limit: usize) -> i64 {
    i64::try_from(limit.saturating_add(1)).unwrap_or(i64::MAX)
}
