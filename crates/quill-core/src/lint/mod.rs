//! Lint engines
//!
//! Each target has its own engine producing a raw [`LintOutput`];
//! [`run_lint`] runs the requested engines and applies the rules config.

pub mod agent;
pub mod diagnostic;
pub mod fields;
pub mod filter;
pub mod instruction;
pub mod skill;

pub use diagnostic::{LintDiagnostic, LintOutput, LintSummary, LintTarget, Severity};
pub use filter::apply_rules;

use crate::config::LintRulesConfig;
use crate::error::LintResult;
use crate::quality::QualityAnalyzer;
use quill_scanner::Workspace;
use tracing::info;

/// Run the lint engines for `targets` and filter their output
///
/// Targets run once each in skill, agent, instruction order; an empty
/// slice runs all of them.
///
/// # Errors
/// Returns an error if discovery fails for any target
pub fn run_lint(
    workspace: &dyn Workspace,
    targets: &[LintTarget],
    rules: &LintRulesConfig,
) -> LintResult<Vec<LintOutput>> {
    let mut targets = if targets.is_empty() {
        LintTarget::ALL.to_vec()
    } else {
        targets.to_vec()
    };
    targets.sort_unstable();
    targets.dedup();

    let analyzer = QualityAnalyzer::new();
    targets
        .into_iter()
        .map(|target| {
            let raw = match target {
                LintTarget::Skill => skill::lint_skills(workspace)?,
                LintTarget::Agent => agent::lint_agents(workspace)?,
                LintTarget::Instruction => instruction::lint_instructions(workspace, &analyzer)?,
            };
            let output = apply_rules(raw, rules);
            info!(
                %target,
                files = output.summary.total_files,
                errors = output.summary.total_errors,
                warnings = output.summary.total_warnings,
                "lint finished"
            );
            Ok(output)
        })
        .collect()
}

/// Whether any output still carries an error diagnostic
#[must_use]
pub fn has_errors(outputs: &[LintOutput]) -> bool {
    outputs.iter().any(LintOutput::has_errors)
}
