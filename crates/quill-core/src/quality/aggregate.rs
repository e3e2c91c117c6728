//! Cross-file aggregation and suggestion emission

use super::scorer::{score_command, FileCommandScore};
use super::{CommandQualityScores, ParsedDocument, Suggestion};
use crate::rules::{instruction, Rule};

/// Best score of `command` over `documents`
///
/// Every document is scored independently; the highest composite wins
/// and the first document in discovery order wins ties.
#[must_use]
pub fn best_across_files(command: &str, documents: &[ParsedDocument]) -> CommandQualityScores {
    let mut best: Option<(&ParsedDocument, FileCommandScore)> = None;
    for document in documents {
        let Some(score) = score_command(command, &document.model) else {
            continue;
        };
        if best
            .as_ref()
            .map_or(true, |(_, top)| score.composite() > top.composite())
        {
            best = Some((document, score));
        }
    }

    match best {
        Some((document, score)) => {
            CommandQualityScores::from_file_score(command, document.file.file_path.clone(), &score)
        }
        None => CommandQualityScores::undocumented(command),
    }
}

/// Overall percentage: rounded mean composite, 100 with no commands
#[must_use]
pub fn overall_quality_score(scores: &[CommandQualityScores]) -> u32 {
    if scores.is_empty() {
        return 100;
    }
    let mean = scores.iter().map(|s| s.composite_score).sum::<f64>() / scores.len() as f64;
    (mean * 100.0).round() as u32
}

/// Rules a command's scores violate, each with an actionable message
///
/// An undocumented command yields only `command-not-documented`.
#[must_use]
pub fn gaps(score: &CommandQualityScores) -> Vec<(&'static Rule, String)> {
    let command = &score.command_name;
    if !score.is_documented() {
        return vec![(
            &instruction::COMMAND_NOT_DOCUMENTED,
            format!(
                "Mandatory command `{command}` is not documented in any instruction file; add it in a code block under a Validation heading"
            ),
        )];
    }

    let mut gaps = Vec::new();
    if score.structural_context == 0 {
        gaps.push((
            &instruction::MISSING_STRUCTURAL_CONTEXT,
            format!("Document `{command}` under a Validation or Verification heading"),
        ));
    }
    if score.execution_clarity == 0 {
        gaps.push((
            &instruction::MISSING_EXECUTION_CLARITY,
            format!("Wrap `{command}` in a code block so it can be run verbatim"),
        ));
    }
    if score.loop_completeness == 0 {
        gaps.push((
            &instruction::MISSING_LOOP_COMPLETENESS,
            format!("Describe what to do if `{command}` fails"),
        ));
    }
    gaps
}

/// Suggestions for one command, empty when it scores 1.0
#[must_use]
pub fn suggestions_for(score: &CommandQualityScores) -> Vec<Suggestion> {
    gaps(score)
        .into_iter()
        .map(|(rule, message)| Suggestion {
            command: score.command_name.clone(),
            message,
            rule_id: Some(rule.id.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_scanner::parser::{DocumentModel, StructuralPatterns};
    use quill_scanner::{DiscoveredInstructionFile, InstructionFormat};
    use std::path::Path;

    fn document(path: &str, content: &str) -> ParsedDocument {
        ParsedDocument {
            file: DiscoveredInstructionFile::new(path, InstructionFormat::AgentsManifest),
            content: content.to_string(),
            model: DocumentModel::parse(content, &StructuralPatterns::default()),
        }
    }

    #[test]
    fn test_best_composite_wins() {
        let docs = vec![
            document("AGENTS.md", "Run `npm test`.\n"),
            document(
                "CLAUDE.md",
                "## Validation\n\n```\nnpm test\n```\n\nIf it fails, fix it.\n",
            ),
        ];
        let score = best_across_files("test", &docs);
        assert_eq!(score.best_source_file.as_deref(), Some(Path::new("CLAUDE.md")));
        assert!((score.composite_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ties_keep_first_file() {
        let docs = vec![
            document("AGENTS.md", "Run `npm test`.\n"),
            document("CLAUDE.md", "Run `npm test`.\n"),
        ];
        let score = best_across_files("test", &docs);
        assert_eq!(score.best_source_file.as_deref(), Some(Path::new("AGENTS.md")));
    }

    #[test]
    fn test_undocumented_command() {
        let docs = vec![document("AGENTS.md", "# Nothing here\n")];
        let score = best_across_files("lint", &docs);
        assert!(!score.is_documented());
        assert!(score.composite_score.abs() < f64::EPSILON);

        let suggestions = suggestions_for(&score);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].rule_id.as_deref(),
            Some("instruction/command-not-documented")
        );
    }

    #[test]
    fn test_one_suggestion_per_missing_dimension() {
        let docs = vec![document("AGENTS.md", "Run npm test before committing.\n")];
        let score = best_across_files("test", &docs);
        let suggestions = suggestions_for(&score);
        let rule_ids: Vec<_> = suggestions
            .iter()
            .filter_map(|s| s.rule_id.as_deref())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "instruction/missing-structural-context",
                "instruction/missing-execution-clarity",
                "instruction/missing-loop-completeness",
            ]
        );
        assert!(suggestions.iter().all(|s| s.message.contains("`test`")));
    }

    #[test]
    fn test_overall_quality_score() {
        assert_eq!(overall_quality_score(&[]), 100);

        let mut full = CommandQualityScores::undocumented("test");
        full.composite_score = 1.0;
        let partial = CommandQualityScores {
            composite_score: 0.33,
            ..CommandQualityScores::undocumented("lint")
        };
        let none = CommandQualityScores::undocumented("build");
        assert_eq!(overall_quality_score(&[full, partial, none]), 44);
    }
}
