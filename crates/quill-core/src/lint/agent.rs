//! Agent definition lint engine

use super::fields::{description_problem, name_problem};
use super::{LintDiagnostic, LintOutput, LintTarget};
use crate::error::LintResult;
use crate::rules::agent as rules;
use quill_scanner::parser::frontmatter::{extract_frontmatter, AgentFrontmatter, Field};
use quill_scanner::Workspace;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Lint every agent definition in the workspace
pub fn lint_agents(workspace: &dyn Workspace) -> LintResult<LintOutput> {
    let files = workspace.agent_files()?;
    debug!(count = files.len(), "linting agents");

    let per_file: Vec<Vec<LintDiagnostic>> = files
        .par_iter()
        .map(|path| match workspace.read_to_string(path) {
            Ok(content) => lint_agent(path, &content),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot read agent");
                vec![LintDiagnostic::unreadable(LintTarget::Agent, path, e)]
            }
        })
        .collect();

    Ok(LintOutput::new(
        LintTarget::Agent,
        files,
        per_file.into_iter().flatten().collect(),
    ))
}

/// Lint one agent definition
///
/// `name` is optional for agents; when present it must follow the
/// naming convention and should match the file stem.
#[must_use]
pub fn lint_agent(path: &Path, content: &str) -> Vec<LintDiagnostic> {
    let parsed = match extract_frontmatter(content) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            return vec![LintDiagnostic::for_rule(
                &rules::MISSING_FRONTMATTER,
                path,
                1,
                "Missing frontmatter: agent definitions must start with a --- block declaring a description",
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

    let fm = AgentFrontmatter::from_parsed(&parsed);
    let mut diagnostics = Vec::new();

    let name_line = parsed.line_of("name");
    match &fm.name {
        Field::Missing => {}
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
            } else if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem != name {
                    diagnostics.push(
                        LintDiagnostic::for_rule(
                            &rules::NAME_MISMATCH,
                            path,
                            name_line,
                            format!("name '{name}' does not match file name '{stem}'"),
                        )
                        .with_field("name"),
                    );
                }
            }
        }
    }

    let description_line = parsed.line_of("description");
    let description_issue = match &fm.description {
        Field::Missing => Some((
            &rules::MISSING_DESCRIPTION,
            "Missing required field 'description'".to_string(),
        )),
        Field::WrongType(kind) => Some((
            &rules::INVALID_DESCRIPTION,
            format!("description must be a string, found {kind}"),
        )),
        Field::Present(description) => description_problem(description)
            .map(|problem| (&rules::INVALID_DESCRIPTION, problem)),
    };
    if let Some((rule, message)) = description_issue {
        diagnostics.push(
            LintDiagnostic::for_rule(rule, path, description_line, message)
                .with_field("description"),
        );
    }

    if let Field::WrongType(kind) = &fm.tools {
        diagnostics.push(
            LintDiagnostic::for_rule(
                &rules::INVALID_TOOLS,
                path,
                parsed.line_of("tools"),
                format!("tools must be a list of tool names or a comma-separated string, found {kind}"),
            )
            .with_field("tools"),
        );
    }

    let model_problem = match &fm.model {
        Field::WrongType(kind) => Some(format!("model must be a string, found {kind}")),
        Field::Present(model) if model.trim().is_empty() => {
            Some("model must not be blank".to_string())
        }
        _ => None,
    };
    if let Some(message) = model_problem {
        diagnostics.push(
            LintDiagnostic::for_rule(&rules::INVALID_MODEL, path, parsed.line_of("model"), message)
                .with_field("model"),
        );
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Severity;

    fn lint(content: &str) -> Vec<LintDiagnostic> {
        lint_agent(Path::new(".github/agents/reviewer.md"), content)
    }

    #[test]
    fn test_valid_agent() {
        let diags = lint("---\nname: reviewer\ndescription: Reviews code\ntools: [Read, Grep]\nmodel: sonnet\n---\nYou review code.\n");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn test_name_is_optional() {
        let diags = lint("---\ndescription: Reviews code\n---\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_name_mismatch_is_warning() {
        let diags = lint("---\nname: critic\ndescription: Reviews code\n---\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("agent/name-mismatch"));
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].line, 2);
    }

    #[test]
    fn test_missing_frontmatter() {
        let diags = lint("You review code.\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("agent/missing-frontmatter"));
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn test_invalid_tools_and_model() {
        let diags = lint("---\ndescription: Reviews code\ntools: 3\nmodel: ''\n---\n");
        let ids: Vec<_> = diags.iter().filter_map(|d| d.rule_id.as_deref()).collect();
        assert_eq!(ids, vec!["agent/invalid-tools", "agent/invalid-model"]);
        assert_eq!(diags[0].line, 3);
        assert_eq!(diags[1].line, 4);
    }

    #[test]
    fn test_blank_description() {
        let diags = lint("---\ndescription: '  '\n---\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id.as_deref(), Some("agent/invalid-description"));
        assert_eq!(diags[0].field.as_deref(), Some("description"));
    }
}
