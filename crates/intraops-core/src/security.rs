//! Principals, permissions and the verifier used by the permission decorator

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{ExError, ExErrorKind};

/// A dotted permission name such as `accounting.account_groups.write`
///
/// As a grant, `*` covers everything and `accounting.*` covers every
/// permission below `accounting.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether holding `self` satisfies a requirement for `required`
    pub fn grants(&self, required: &Permission) -> bool {
        if self.0 == "*" || self.0 == required.0 {
            return true;
        }
        match self.0.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('.') => required.0.starts_with(prefix),
            _ => false,
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The authenticated caller a dispatch runs on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn has(&self, required: &Permission) -> bool {
        self.permissions.iter().any(|held| held.grants(required))
    }
}

/// Decides whether a caller may run a message
#[allow(clippy::result_large_err)]
pub trait PermissionVerifier: Send + Sync {
    /// # Errors
    ///
    /// `Unauthorised` when permissions are required but there is no caller,
    /// `Forbidden` when the caller lacks one of them.
    fn verify(&self, principal: Option<&Principal>, required: &[Permission])
        -> Result<(), ExError>;
}

/// Checks required permissions against the principal's grants
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantPermissionVerifier;

impl PermissionVerifier for GrantPermissionVerifier {
    fn verify(
        &self,
        principal: Option<&Principal>,
        required: &[Permission],
    ) -> Result<(), ExError> {
        if required.is_empty() {
            return Ok(());
        }
        let Some(principal) = principal else {
            return Err(ExError::new(ExErrorKind::Unauthorised)
                .with_message("an authenticated caller is required"));
        };
        let missing: Vec<&str> = required
            .iter()
            .filter(|p| !principal.has(p))
            .map(Permission::as_str)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(principal.user_id.clone())
                .with_message(format!("missing permission {}", missing.join(", "))))
        }
    }
}
