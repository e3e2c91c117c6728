//! Diagnostic model shared by every lint target

use crate::quality::Suggestion;
use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Kind of artifact a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintTarget {
    Skill,
    Agent,
    Instruction,
}

impl LintTarget {
    pub const ALL: [LintTarget; 3] = [Self::Skill, Self::Agent, Self::Instruction];

    /// Rule id namespace (`skill/…`)
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Agent => "agent",
            Self::Instruction => "instruction",
        }
    }

    /// Key under `lint.rules` in the config file
    #[must_use]
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Skill => "skills",
            Self::Agent => "agents",
            Self::Instruction => "instructions",
        }
    }
}

impl fmt::Display for LintTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

impl FromStr for LintTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skill" | "skills" => Ok(Self::Skill),
            "agent" | "agents" => Ok(Self::Agent),
            "instruction" | "instructions" => Ok(Self::Instruction),
            _ => Err(format!("Invalid lint target: {s}")),
        }
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A single finding in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintDiagnostic {
    pub file_path: PathBuf,
    /// 1-indexed line
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    pub severity: Severity,
    pub message: String,
    /// `<target>/<rule-name>`; diagnostics without one cannot be reconfigured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Frontmatter field the diagnostic is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub target: LintTarget,
}

impl LintDiagnostic {
    pub fn new(
        target: LintTarget,
        file_path: impl Into<PathBuf>,
        line: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line: line.max(1),
            column: None,
            end_line: None,
            end_column: None,
            severity,
            message: message.into(),
            rule_id: None,
            field: None,
            target,
        }
    }

    /// Diagnostic for a built-in rule, at the rule's default severity
    pub fn for_rule(
        rule: &Rule,
        file_path: impl Into<PathBuf>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        let mut diagnostic = Self::new(rule.target, file_path, line, rule.severity, message);
        diagnostic.rule_id = Some(rule.id.to_string());
        diagnostic
    }

    /// Non-configurable error for a file that could not be read
    pub fn unreadable(target: LintTarget, file_path: &Path, error: impl fmt::Display) -> Self {
        Self::new(
            target,
            file_path,
            1,
            Severity::Error,
            format!("Failed to read file: {error}"),
        )
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Diagnostic counts for one target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintSummary {
    pub total_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_infos: usize,
}

impl LintSummary {
    #[must_use]
    pub fn from_diagnostics(total_files: usize, diagnostics: &[LintDiagnostic]) -> Self {
        let count = |severity: Severity| {
            diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        Self {
            total_files,
            total_errors: count(Severity::Error),
            total_warnings: count(Severity::Warning),
            total_infos: count(Severity::Info),
        }
    }
}

/// Everything one lint target produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintOutput {
    pub diagnostics: Vec<LintDiagnostic>,
    pub target: LintTarget,
    pub files_analyzed: Vec<PathBuf>,
    pub summary: LintSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    /// Overall instruction quality percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u32>,
}

impl LintOutput {
    #[must_use]
    pub fn new(
        target: LintTarget,
        files_analyzed: Vec<PathBuf>,
        diagnostics: Vec<LintDiagnostic>,
    ) -> Self {
        let summary = LintSummary::from_diagnostics(files_analyzed.len(), &diagnostics);
        Self {
            diagnostics,
            target,
            files_analyzed,
            summary,
            suggestions: Vec::new(),
            quality_score: None,
        }
    }

    #[must_use]
    pub fn with_quality(mut self, quality_score: Option<u32>, suggestions: Vec<Suggestion>) -> Self {
        self.quality_score = quality_score;
        self.suggestions = suggestions;
        self
    }

    /// Analyzed files without any diagnostic
    pub fn clean_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files_analyzed
            .iter()
            .filter(move |file| !self.diagnostics.iter().any(|d| &d.file_path == *file))
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.total_errors > 0
    }
}
