//! Quill Scanner - instruction file discovery and parsing
//!
//! This crate locates agent instruction files, skills and agent definitions
//! in a repository and turns them into parsed structures: frontmatter
//! blocks, markdown document models and the project's mandatory commands.
//! It is the only Quill crate that touches the filesystem.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::map_unwrap_or,
    clippy::manual_let_else
)]

pub mod error;
pub mod parser;
pub mod types;
pub mod workspace;

pub use error::{ScanError, ScanResult};
pub use types::{DiscoveredInstructionFile, InstructionFormat};
pub use workspace::{FsWorkspace, Workspace};
