//! Boundary validation for target directories

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors related to path validation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Path traversal attempt detected: {0}")]
    TraversalAttempt(String),

    #[error("Invalid path component: {0}")]
    InvalidComponent(String),
}

/// Validate a target directory supplied by a user or an MCP client
///
/// Rejects empty paths, control characters and `..` components. The
/// directory does not need to exist: a missing directory lints as an
/// empty repository.
///
/// # Errors
/// Returns an error if the path is empty, contains control characters
/// or tries to traverse upwards
pub fn validate_target_dir(path: &Path) -> Result<PathBuf, PathError> {
    let raw = path.to_string_lossy();
    if raw.trim().is_empty() {
        return Err(PathError::InvalidComponent("Empty path".to_string()));
    }
    if raw.chars().any(char::is_control) {
        return Err(PathError::InvalidComponent(
            "Control character in path".to_string(),
        ));
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(PathError::TraversalAttempt(path.display().to_string()));
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    Ok(normalized)
}
