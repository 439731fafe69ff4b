//! Application configuration
//!
//! ```toml
//! database_path = "intraops.db"
//! log_profile = "production"
//!
//! [operator]
//! user_id = "jdoe"
//! display_name = "J. Doe"
//! permissions = ["accounting.*"]
//!
//! [pipeline]
//! timeout_ms = 5000
//! ```

use std::path::{Path, PathBuf};

use intraops_core::errors::{ExError, ExErrorKind, Result};
use intraops_core::logging_facility::Profile;
use intraops_core::Principal;
use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = "intraops.db";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_profile: Profile,
    pub operator: OperatorConfig,
    pub pipeline: PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_profile: Profile::default(),
            operator: OperatorConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// The principal local invocations run as
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatorConfig {
    pub user_id: String,
    pub display_name: Option<String>,
    pub permissions: Vec<String>,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            user_id: "operator".to_string(),
            display_name: None,
            permissions: vec!["*".to_string()],
        }
    }
}

impl OperatorConfig {
    pub fn principal(&self) -> Principal {
        let mut principal = self
            .permissions
            .iter()
            .fold(Principal::new(self.user_id.clone()), |p, perm| {
                p.with_permission(perm.as_str())
            });
        principal.display_name = self.display_name.clone();
        principal
    }
}

/// Which stock decorators are bound, and the per-dispatch deadline
///
/// Cancellation is always bound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub logging: bool,
    pub permissions: bool,
    pub validation: bool,
    pub transactions: bool,
    pub timeout_ms: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            logging: true,
            permissions: true,
            validation: true,
            transactions: true,
            timeout_ms: None,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// `Config` if the document is malformed or has unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(e.to_string())
        })
    }

    /// Load the file at `path`; a missing file yields the defaults
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be read, `Config` if it does not
    /// parse.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&source).map_err(|e| e.with_entity_id(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_default_operator_holds_everything() {
        let principal = OperatorConfig::default().principal();
        assert_eq!(principal.user_id, "operator");
        assert!(principal.has(&"accounting.payment_terms.write".into()));
    }
}
