//! Error types for lint operations

use crate::util::PathError;
use quill_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for lint operations
pub type LintResult<T> = Result<T, LintError>;

/// Errors that abort a lint or analysis run
///
/// Problems inside individual files never surface here; they become
/// diagnostics or parsing errors instead.
#[derive(Debug, Error)]
pub enum LintError {
    /// Rules config file could not be read
    #[error("Failed to read config {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    /// Rules config file has the wrong shape
    #[error("Invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Rule id does not match `<namespace>/<rule-name>`
    #[error("Invalid rule id '{rule_id}' in {target} rules: expected <namespace>/<rule-name>")]
    InvalidRuleId { target: String, rule_id: String },

    /// Severity other than error, warn or off
    #[error("Invalid severity '{value}' for rule '{rule_id}': expected error, warn or off")]
    InvalidSeverity { rule_id: String, value: String },

    /// Target directory rejected before any work started
    #[error("Invalid target directory: {0}")]
    InvalidTargetDir(#[from] PathError),

    /// Discovery failed
    #[error("Scanner error: {0}")]
    Scan(#[from] ScanError),

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LintError {
    /// Get the error code for CLI/MCP responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigRead { .. } => "CONFIG_READ_ERROR",
            Self::ConfigParse { .. } | Self::InvalidRuleId { .. } | Self::InvalidSeverity { .. } => {
                "CONFIG_ERROR"
            }
            Self::InvalidTargetDir(_) => "INVALID_TARGET",
            Self::Scan(_) => "SCANNER_ERROR",
            Self::Serialize(_) => "INTERNAL_ERROR",
        }
    }
}
