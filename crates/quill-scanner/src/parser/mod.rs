//! Parsers for instruction files and project manifests

pub mod frontmatter;
pub mod manifest;
pub mod markdown;

pub use frontmatter::{extract_frontmatter, ParsedFrontmatter};
pub use manifest::parse_package_json;
pub use markdown::{DocumentModel, StructuralPatterns};
