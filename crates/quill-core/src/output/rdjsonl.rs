//! Line-delimited diagnostics for review tooling
//!
//! Each line is one compact JSON object in the Reviewdog Diagnostic
//! Format:
//!
//! ```json
//! {"message":"x","location":{"path":"a.md","range":{"start":{"line":2}}},"severity":"WARNING","code":{"value":"skill/y"}}
//! ```
//!
//! Field order and casing are part of the contract.

use crate::error::LintResult;
use crate::lint::{LintDiagnostic, LintOutput, Severity};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RdDiagnostic<'a> {
    message: &'a str,
    location: RdLocation,
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<RdCode<'a>>,
}

#[derive(Debug, Serialize)]
struct RdLocation {
    path: String,
    range: RdRange,
}

#[derive(Debug, Serialize)]
struct RdRange {
    start: RdPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<RdPosition>,
}

#[derive(Debug, Serialize)]
struct RdPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RdCode<'a> {
    value: &'a str,
}

fn rd_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARNING",
        Severity::Info => "INFO",
    }
}

impl<'a> From<&'a LintDiagnostic> for RdDiagnostic<'a> {
    fn from(d: &'a LintDiagnostic) -> Self {
        let end = (d.end_line.is_some() || d.end_column.is_some()).then_some(RdPosition {
            line: d.end_line,
            column: d.end_column,
        });
        Self {
            message: &d.message,
            location: RdLocation {
                path: d.file_path.to_string_lossy().into_owned(),
                range: RdRange {
                    start: RdPosition {
                        line: Some(d.line),
                        column: d.column,
                    },
                    end,
                },
            },
            severity: rd_severity(d.severity),
            code: d.rule_id.as_deref().map(|value| RdCode { value }),
        }
    }
}

/// One JSON object per diagnostic, newline separated, no trailing newline
///
/// # Errors
/// Returns an error if serialization fails
pub fn format(outputs: &[LintOutput]) -> LintResult<String> {
    let lines = outputs
        .iter()
        .flat_map(|o| o.diagnostics.iter())
        .map(|d| serde_json::to_string(&RdDiagnostic::from(d)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::LintTarget;
    use std::path::PathBuf;

    fn output(diagnostics: Vec<LintDiagnostic>) -> Vec<LintOutput> {
        vec![LintOutput::new(
            LintTarget::Skill,
            vec![PathBuf::from("a.md")],
            diagnostics,
        )]
    }

    #[test]
    fn test_wire_shape() {
        let mut d = LintDiagnostic::new(LintTarget::Skill, "a.md", 2, Severity::Warning, "x");
        d.rule_id = Some("skill/y".to_string());
        assert_eq!(
            format(&output(vec![d])).unwrap(),
            r#"{"message":"x","location":{"path":"a.md","range":{"start":{"line":2}}},"severity":"WARNING","code":{"value":"skill/y"}}"#
        );
    }

    #[test]
    fn test_code_omitted_without_rule_and_end_range() {
        let mut d = LintDiagnostic::new(LintTarget::Skill, "a.md", 4, Severity::Error, "io");
        d.column = Some(3);
        d.end_line = Some(5);
        assert_eq!(
            format(&output(vec![d])).unwrap(),
            r#"{"message":"io","location":{"path":"a.md","range":{"start":{"line":4,"column":3},"end":{"line":5}}},"severity":"ERROR"}"#
        );
    }

    #[test]
    fn test_one_line_per_diagnostic() {
        let diags = vec![
            LintDiagnostic::new(LintTarget::Skill, "a.md", 1, Severity::Info, "one"),
            LintDiagnostic::new(LintTarget::Skill, "a.md", 2, Severity::Info, "two"),
        ];
        let out = format(&output(diags)).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(!out.ends_with('\n'));
        assert!(format(&[]).unwrap().is_empty());
    }
}
