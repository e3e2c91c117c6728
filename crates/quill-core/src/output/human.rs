//! Human-readable terminal output

use crate::lint::{LintDiagnostic, LintOutput, LintSummary, LintTarget, Severity};

fn glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "✖",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    }
}

fn heading(target: LintTarget) -> &'static str {
    match target {
        LintTarget::Skill => "Skills",
        LintTarget::Agent => "Agents",
        LintTarget::Instruction => "Instructions",
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Render one diagnostic as `<glyph> path:line [field]: message (ruleId)`
#[must_use]
pub fn diagnostic_line(d: &LintDiagnostic) -> String {
    let mut line = format!("{} {}:{}", glyph(d.severity), d.file_path.display(), d.line);
    if let Some(field) = &d.field {
        line.push_str(&format!(" [{field}]"));
    }
    line.push_str(&format!(": {}", d.message));
    if let Some(rule_id) = &d.rule_id {
        line.push_str(&format!(" ({rule_id})"));
    }
    line
}

fn summary_line(summary: &LintSummary) -> String {
    format!(
        "{} analyzed, {}, {}, {}",
        plural(summary.total_files, "file"),
        plural(summary.total_errors, "error"),
        plural(summary.total_warnings, "warning"),
        plural(summary.total_infos, "info")
    )
}

/// Render every output as a report for the terminal
#[must_use]
pub fn format(outputs: &[LintOutput]) -> String {
    let mut out = String::new();

    for (i, output) in outputs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", heading(output.target)));

        if output.files_analyzed.is_empty() {
            out.push_str(&format!("  ℹ No {} files found\n", output.target));
        }
        for file in output.clean_files() {
            out.push_str(&format!("  ✓ {}\n", file.display()));
        }
        for diagnostic in &output.diagnostics {
            out.push_str(&format!("  {}\n", diagnostic_line(diagnostic)));
        }

        if let Some(score) = output.quality_score {
            out.push_str(&format!("  Instruction quality: {score}%\n"));
        }
        for suggestion in &output.suggestions {
            out.push_str(&format!("  → {}\n", suggestion.message));
        }

        out.push_str(&format!("  {}\n", summary_line(&output.summary)));
    }

    out
}
