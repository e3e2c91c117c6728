//! Mandatory command extraction from `package.json`

use crate::error::{ScanError, ScanResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Script names that make up a project's feedback loop by convention
pub const MANDATORY_SCRIPT_NAMES: &[&str] = &["test", "build", "lint", "format"];

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    scripts: Map<String, Value>,
}

/// Mandatory command names from a `package.json` script table
///
/// A script is mandatory when its name equals one of
/// [`MANDATORY_SCRIPT_NAMES`] or is namespaced under one (`lint:fix`).
/// Manifest order is preserved.
///
/// # Errors
/// Returns an error if the manifest is not valid JSON
pub fn parse_package_json(path: &Path, content: &str) -> ScanResult<Vec<String>> {
    let manifest: PackageManifest =
        serde_json::from_str(content).map_err(|e| ScanError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(manifest
        .scripts
        .keys()
        .filter(|name| is_mandatory_script(name))
        .cloned()
        .collect())
}

fn is_mandatory_script(name: &str) -> bool {
    MANDATORY_SCRIPT_NAMES.iter().any(|kw| {
        name == *kw
            || name
                .strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with(':'))
    })
}
