pub const ACCOUNT_GROUPS_READ: &str = "accounting.account_groups.read";
pub const ACCOUNT_GROUPS_WRITE: &str = "accounting.account_groups.write";
pub const PAYMENT_TERMS_READ: &str = "accounting.payment_terms.read";
pub const PAYMENT_TERMS_WRITE: &str = "accounting.payment_terms.write";
