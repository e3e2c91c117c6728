//! Error types for the Quill scanner

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scanner operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur during discovery and parsing
#[derive(Error, Debug)]
pub enum ScanError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error tied to a specific file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse frontmatter
    #[error("Failed to parse frontmatter: {0}")]
    FrontmatterParse(String),

    /// Failed to parse the project manifest
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Failed to walk a directory
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
