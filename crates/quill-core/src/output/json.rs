//! JSON output formatter

use crate::error::LintResult;
use crate::lint::{LintDiagnostic, LintOutput};

/// Pretty JSON array of every diagnostic across all outputs
///
/// # Errors
/// Returns an error if serialization fails
pub fn format(outputs: &[LintOutput]) -> LintResult<String> {
    let diagnostics: Vec<&LintDiagnostic> =
        outputs.iter().flat_map(|o| o.diagnostics.iter()).collect();
    serde_json::to_string_pretty(&diagnostics).map_err(Into::into)
}
