//! Skill lint engine
//!
//! Validates the frontmatter of every `SKILL.md`: required `name` and
//! `description`, the naming convention, the name matching its
//! directory, and the shape of `allowed-tools`.

use super::fields::{description_problem, name_problem};
use super::{LintDiagnostic, LintOutput, LintTarget};
use crate::error::LintResult;
use crate::rules::skill as rules;
use quill_scanner::parser::frontmatter::{extract_frontmatter, Field, SkillFrontmatter};
use quill_scanner::Workspace;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Lint every skill in the workspace
pub fn lint_skills(workspace: &dyn Workspace) -> LintResult<LintOutput> {
    let files = workspace.skill_files()?;
    debug!(count = files.len(), "linting skills");

    let per_file: Vec<Vec<LintDiagnostic>> = files
        .par_iter()
        .map(|path| match workspace.read_to_string(path) {
            Ok(content) => lint_skill(path, &content),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot read skill");
                vec![LintDiagnostic::unreadable(LintTarget::Skill, path, e)]
            }
        })
        .collect();

    Ok(LintOutput::new(
        LintTarget::Skill,
        files,
        per_file.into_iter().flatten().collect(),
    ))
}

/// Lint one `SKILL.md`
#[must_use]
pub fn lint_skill(path: &Path, content: &str) -> Vec<LintDiagnostic> {
    let parsed = match extract_frontmatter(content) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            return vec![LintDiagnostic::for_rule(
                &rules::MISSING_FRONTMATTER,
                path,
                1,
                "Missing frontmatter: SKILL.md must start with a --- block declaring name and description",
            )]
        }
        Err(e) => {
            return vec![LintDiagnostic::for_rule(
                &rules::INVALID_FRONTMATTER,
                path,
                1,
                e.to_string(),
            )]
        }
    };

    let fm = SkillFrontmatter::from_parsed(&parsed);
    let mut diagnostics = Vec::new();

    let name_line = parsed.line_of("name");
    match &fm.name {
        Field::Missing => diagnostics.push(
            LintDiagnostic::for_rule(
                &rules::MISSING_NAME,
                path,
                name_line,
                "Missing required field 'name'",
            )
            .with_field("name"),
        ),
        Field::WrongType(kind) => diagnostics.push(
            LintDiagnostic::for_rule(
                &rules::INVALID_NAME,
                path,
                name_line,
                format!("name must be a string, found {kind}"),
            )
            .with_field("name"),
        ),
        Field::Present(name) => {
            if let Some(problem) = name_problem(name) {
                diagnostics.push(
                    LintDiagnostic::for_rule(&rules::INVALID_NAME, path, name_line, problem)
                        .with_field("name"),
                );
            } else if let Some(dir) = skill_dir_name(path) {
                if dir != name {
                    diagnostics.push(
                        LintDiagnostic::for_rule(
                            &rules::NAME_MISMATCH,
                            path,
                            name_line,
                            format!("name '{name}' does not match skill directory '{dir}'"),
                        )
                        .with_field("name"),
                    );
                }
            }
        }
    }

    let description_line = parsed.line_of("description");
    match &fm.description {
        Field::Missing => diagnostics.push(
            LintDiagnostic::for_rule(
                &rules::MISSING_DESCRIPTION,
                path,
                description_line,
                "Missing required field 'description'",
            )
            .with_field("description"),
        ),
        Field::WrongType(kind) => diagnostics.push(
            LintDiagnostic::for_rule(
                &rules::INVALID_DESCRIPTION,
                path,
                description_line,
                format!("description must be a string, found {kind}"),
            )
            .with_field("description"),
        ),
        Field::Present(description) => {
            if let Some(problem) = description_problem(description) {
                diagnostics.push(
                    LintDiagnostic::for_rule(
                        &rules::INVALID_DESCRIPTION,
                        path,
                        description_line,
                        problem,
                    )
                    .with_field("description"),
                );
            }
        }
    }

    if let Field::WrongType(kind) = &fm.allowed_tools {
        diagnostics.push(
            LintDiagnostic::for_rule(
                &rules::INVALID_ALLOWED_TOOLS,
                path,
                parsed.line_of("allowed-tools"),
                format!("allowed-tools must be a list of tool names or a comma-separated string, found {kind}"),
            )
            .with_field("allowed-tools"),
        );
    }

    diagnostics
}

fn skill_dir_name(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Severity;

    fn lint(content: &str) -> Vec<LintDiagnostic> {
        lint_skill(Path::new(".github/skills/foo/SKILL.md"), content)
    }

    #[test]
    fn test_valid_skill() {
        let diags = lint("---\nname: foo\ndescription: Does foo things\nallowed-tools: Read, Grep\n---\n# Foo\n");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn test_missing_description() {
        let diags = lint("---\nname: foo\n---\n# Foo\n");
        assert_eq!(diags.len(), 1);
        let diag = &diags[0];
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.field.as_deref(), Some("description"));
        assert_eq!(diag.rule_id.as_deref(), Some("skill/missing-description"));
        assert_eq!(diag.line, 1);
    }

    #[test]
    fn test_missing_frontmatter_is_single_diagnostic() {
        let diags = lint("# Foo\n\nNo frontmatter here.\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("skill/missing-frontmatter"));
    }

    #[test]
    fn test_invalid_yaml() {
        let diags = lint("---\nname: [unclosed\n---\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("skill/invalid-frontmatter"));
    }

    #[test]
    fn test_name_mismatch_points_at_field() {
        let diags = lint("---\ndescription: Does bar things\nname: bar\n---\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("skill/name-mismatch"));
        assert_eq!(diags[0].line, 3);
    }

    #[test]
    fn test_invalid_name_skips_mismatch() {
        let diags = lint("---\nname: Foo_Bar\ndescription: ok\n---\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("skill/invalid-name"));
    }

    #[test]
    fn test_wrong_types() {
        let diags = lint("---\nname: 42\ndescription: [a, b]\nallowed-tools: {read: true}\n---\n");
        let ids: Vec<_> = diags.iter().filter_map(|d| d.rule_id.as_deref()).collect();
        assert_eq!(
            ids,
            vec![
                "skill/invalid-name",
                "skill/invalid-description",
                "skill/invalid-allowed-tools"
            ]
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let diags = lint("---\nname: foo\ndescription: ok\nlicense: MIT\nmetadata:\n  a: b\n---\n");
        assert!(diags.is_empty());
    }
}
