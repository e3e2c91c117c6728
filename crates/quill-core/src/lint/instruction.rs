//! Instruction lint engine
//!
//! Runs the quality analysis over the discovered instruction files and
//! reports every scoring gap as a diagnostic at the command's best
//! occurrence. Scoped `.instructions.md` files additionally have their
//! `applyTo` frontmatter checked.

use super::{LintDiagnostic, LintOutput, LintTarget};
use crate::error::LintResult;
use crate::quality::aggregate::gaps;
use crate::quality::{CommandQualityScores, ParsedDocument, QualityAnalyzer};
use crate::rules::instruction as rules;
use quill_scanner::parser::frontmatter::{extract_frontmatter, Field, InstructionFrontmatter};
use quill_scanner::Workspace;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lint the workspace's instruction files
pub fn lint_instructions(
    workspace: &dyn Workspace,
    analyzer: &QualityAnalyzer,
) -> LintResult<LintOutput> {
    let files = workspace.instruction_files()?;
    let commands = workspace.mandatory_commands()?;
    debug!(
        files = files.len(),
        commands = commands.len(),
        "linting instructions"
    );

    let (documents, parsing_errors) = analyzer.load_documents(workspace, &files);

    let mut diagnostics: Vec<LintDiagnostic> = parsing_errors
        .iter()
        .map(|error| {
            LintDiagnostic::for_rule(
                &rules::PARSE_ERROR,
                &error.file_path,
                1,
                format!("Failed to parse instruction file: {}", error.error),
            )
        })
        .collect();

    diagnostics.extend(
        documents
            .iter()
            .filter(|doc| doc.file.format.requires_frontmatter())
            .flat_map(lint_scoped),
    );

    let files_analyzed: Vec<PathBuf> = files.iter().map(|f| f.file_path.clone()).collect();
    let first_file = documents.first().map(|doc| doc.file.file_path.clone());

    let result = analyzer.analyze_documents(files, &documents, &commands, parsing_errors);
    for score in &result.command_scores {
        diagnostics.extend(score_diagnostics(score, first_file.as_deref()));
    }

    Ok(LintOutput::new(LintTarget::Instruction, files_analyzed, diagnostics)
        .with_quality(Some(result.overall_quality_score), result.suggestions))
}

/// Diagnostics for one command's scoring gaps
///
/// Documented commands are reported at their best occurrence. Commands
/// no file documents are pinned to the first readable instruction file,
/// or not reported at all when there is none.
fn score_diagnostics(
    score: &CommandQualityScores,
    first_file: Option<&Path>,
) -> Vec<LintDiagnostic> {
    let (file, line) = match (&score.best_source_file, first_file) {
        (Some(best), _) => (best.as_path(), score.best_line),
        (None, Some(first)) => (first, 1),
        (None, None) => return Vec::new(),
    };
    gaps(score)
        .into_iter()
        .map(|(rule, message)| LintDiagnostic::for_rule(rule, file, line, message))
        .collect()
}

fn lint_scoped(document: &ParsedDocument) -> Vec<LintDiagnostic> {
    let path = document.file.file_path.as_path();
    let parsed = match extract_frontmatter(&document.content) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            return vec![LintDiagnostic::for_rule(
                &rules::MISSING_APPLY_TO,
                path,
                1,
                "Scoped instruction file has no frontmatter; add an applyTo glob",
            )
            .with_field("applyTo")]
        }
        Err(e) => {
            return vec![LintDiagnostic::for_rule(&rules::INVALID_FRONTMATTER, path, 1, e.to_string())]
        }
    };

    let line = parsed.line_of("applyTo");
    match InstructionFrontmatter::from_parsed(&parsed).apply_to {
        Field::Present(globs) if !globs.items().is_empty() => Vec::new(),
        Field::Present(_) | Field::Missing => vec![LintDiagnostic::for_rule(
            &rules::MISSING_APPLY_TO,
            path,
            line,
            "Missing applyTo: scoped instructions need a glob saying which files they cover",
        )
        .with_field("applyTo")],
        Field::WrongType(kind) => vec![LintDiagnostic::for_rule(
            &rules::INVALID_FRONTMATTER,
            path,
            line,
            format!("applyTo must be a glob or a list of globs, found {kind}"),
        )
        .with_field("applyTo")],
    }
}
