//! Rule severity filter

use super::LintOutput;
use crate::config::{LintRulesConfig, RuleSeverity};

/// Apply configured rule severities to a raw lint output
///
/// `off` drops a diagnostic, `warn` and `error` remap its severity.
/// Diagnostics without a rule id, or with a rule id the config does not
/// know, pass through unchanged. Suggestions of rules turned `off` are
/// dropped too. Order is preserved and the summary recomputed.
#[must_use]
pub fn apply_rules(output: LintOutput, rules: &LintRulesConfig) -> LintOutput {
    let LintOutput {
        diagnostics,
        target,
        files_analyzed,
        suggestions,
        quality_score,
        ..
    } = output;

    let diagnostics = diagnostics
        .into_iter()
        .filter_map(|mut diagnostic| {
            let Some(rule_id) = diagnostic.rule_id.as_deref() else {
                return Some(diagnostic);
            };
            match rules.severity_of(diagnostic.target, rule_id) {
                None => Some(diagnostic),
                Some(setting) => {
                    diagnostic.severity = setting.as_severity()?;
                    Some(diagnostic)
                }
            }
        })
        .collect();

    let suggestions = suggestions
        .into_iter()
        .filter(|suggestion| {
            suggestion.rule_id.as_deref().map_or(true, |rule_id| {
                rules.severity_of(target, rule_id) != Some(RuleSeverity::Off)
            })
        })
        .collect();

    LintOutput::new(target, files_analyzed, diagnostics).with_quality(quality_score, suggestions)
}
