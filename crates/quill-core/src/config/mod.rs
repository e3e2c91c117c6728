//! Lint rules configuration
//!
//! The rules config maps rule ids to `error`, `warn` or `off` per target.
//! It is loaded once per command run, merged over the built-in defaults
//! and passed explicitly to the severity filter.
//!
//! ```yaml
//! lint:
//!   rules:
//!     skills:
//!       skill/name-mismatch: warn
//!     instructions:
//!       instruction/missing-loop-completeness: off
//! ```

use crate::error::{LintError, LintResult};
use crate::lint::{LintTarget, Severity};
use crate::rules;
use quill_scanner::Workspace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Config files looked up in the target directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "quill.config.json",
    "quill.config.yaml",
    "quill.config.yml",
    ".quillrc.json",
];

static RULE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn rule_id_re() -> &'static Regex {
    RULE_ID_RE.get_or_init(|| Regex::new(r"^[a-z]+/[a-z]+(-[a-z]+)*$").expect("valid regex"))
}

/// Configured severity of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Error,
    Warn,
    /// Drop every diagnostic of the rule
    Off,
}

impl RuleSeverity {
    /// Diagnostic severity this setting maps to, `None` for `Off`
    #[must_use]
    pub fn as_severity(self) -> Option<Severity> {
        match self {
            Self::Error => Some(Severity::Error),
            Self::Warn => Some(Severity::Warning),
            Self::Off => None,
        }
    }

    fn parse(rule_id: &str, value: &str) -> LintResult<Self> {
        match value {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "off" => Ok(Self::Off),
            _ => Err(LintError::InvalidSeverity {
                rule_id: rule_id.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

impl From<Severity> for RuleSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::Error,
            Severity::Warning | Severity::Info => Self::Warn,
        }
    }
}

/// Syntax of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Guess from the file extension, JSON unless `.yaml`/`.yml`
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfigFile {
    #[serde(default)]
    lint: Option<RawLintSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLintSection {
    #[serde(default)]
    rules: Option<RawRules>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRules {
    #[serde(default)]
    skills: Option<BTreeMap<String, String>>,
    #[serde(default)]
    agents: Option<BTreeMap<String, String>>,
    #[serde(default)]
    instructions: Option<BTreeMap<String, String>>,
}

impl RawRules {
    fn for_target(&self, target: LintTarget) -> Option<&BTreeMap<String, String>> {
        match target {
            LintTarget::Skill => self.skills.as_ref(),
            LintTarget::Agent => self.agents.as_ref(),
            LintTarget::Instruction => self.instructions.as_ref(),
        }
    }
}

/// Effective rule severities per target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintRulesConfig {
    rules: BTreeMap<LintTarget, BTreeMap<String, RuleSeverity>>,
}

impl Default for LintRulesConfig {
    fn default() -> Self {
        let rules = LintTarget::ALL
            .into_iter()
            .map(|target| {
                let table = rules::builtin(target)
                    .iter()
                    .map(|rule| (rule.id.to_string(), RuleSeverity::from(rule.severity)))
                    .collect();
                (target, table)
            })
            .collect();
        Self { rules }
    }
}

impl LintRulesConfig {
    /// Configured severity of a rule, `None` when the rule is unknown
    #[must_use]
    pub fn severity_of(&self, target: LintTarget, rule_id: &str) -> Option<RuleSeverity> {
        self.rules.get(&target)?.get(rule_id).copied()
    }

    /// Parse a config document and merge it over the defaults
    ///
    /// # Errors
    /// Returns an error if the document has the wrong shape, a rule id is
    /// malformed, or a severity is not `error`, `warn` or `off`
    pub fn parse(content: &str, format: ConfigFormat, path: &Path) -> LintResult<Self> {
        let parse_error = |message: String| LintError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };
        let raw: RawConfigFile = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigFormat::Yaml if content.trim().is_empty() => RawConfigFile::default(),
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let mut config = Self::default();
        if let Some(rules) = raw.lint.and_then(|lint| lint.rules) {
            for target in LintTarget::ALL {
                if let Some(overrides) = rules.for_target(target) {
                    config.merge(target, overrides)?;
                }
            }
        }
        Ok(config)
    }

    fn merge(&mut self, target: LintTarget, overrides: &BTreeMap<String, String>) -> LintResult<()> {
        let table = self.rules.entry(target).or_default();
        for (rule_id, value) in overrides {
            if !rule_id_re().is_match(rule_id) {
                return Err(LintError::InvalidRuleId {
                    target: target.config_key().to_string(),
                    rule_id: rule_id.clone(),
                });
            }
            let severity = RuleSeverity::parse(rule_id, value)?;
            match table.get_mut(rule_id) {
                Some(slot) => *slot = severity,
                None => debug!(%rule_id, %target, "ignoring unknown rule in config"),
            }
        }
        Ok(())
    }
}

/// Load the rules config from the first config file in the workspace
///
/// Falls back to the built-in defaults when no config file exists.
///
/// # Errors
/// Returns an error if a config file exists but cannot be read or parsed
pub fn load_rules_config(workspace: &dyn Workspace) -> LintResult<LintRulesConfig> {
    for name in CONFIG_FILE_NAMES {
        let path = PathBuf::from(name);
        let content = workspace
            .read_optional(&path)
            .map_err(|e| LintError::ConfigRead {
                path: path.clone(),
                message: e.to_string(),
            })?;
        if let Some(content) = content {
            debug!(config = %path.display(), "loading rules config");
            return LintRulesConfig::parse(&content, ConfigFormat::from_path(&path), &path);
        }
    }
    Ok(LintRulesConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(content: &str) -> LintResult<LintRulesConfig> {
        LintRulesConfig::parse(content, ConfigFormat::Json, Path::new("quill.config.json"))
    }

    #[test]
    fn test_defaults_cover_builtin_rules() {
        let config = LintRulesConfig::default();
        assert_eq!(
            config.severity_of(LintTarget::Skill, "skill/missing-description"),
            Some(RuleSeverity::Error)
        );
        assert_eq!(
            config.severity_of(LintTarget::Instruction, "instruction/missing-loop-completeness"),
            Some(RuleSeverity::Warn)
        );
        assert_eq!(config.severity_of(LintTarget::Skill, "skill/unknown"), None);
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let config = parse_json(
            r#"{"lint": {"rules": {"skills": {"skill/name-mismatch": "warn", "skill/made-up": "off"}}}}"#,
        )
        .unwrap();
        assert_eq!(
            config.severity_of(LintTarget::Skill, "skill/name-mismatch"),
            Some(RuleSeverity::Warn)
        );
        assert_eq!(config.severity_of(LintTarget::Skill, "skill/made-up"), None);
        assert_eq!(
            config.severity_of(LintTarget::Skill, "skill/missing-name"),
            Some(RuleSeverity::Error)
        );
    }

    #[test]
    fn test_yaml_config() {
        let config = LintRulesConfig::parse(
            "lint:\n  rules:\n    agents:\n      agent/name-mismatch: 'off'\n",
            ConfigFormat::Yaml,
            Path::new("quill.config.yaml"),
        )
        .unwrap();
        assert_eq!(
            config.severity_of(LintTarget::Agent, "agent/name-mismatch"),
            Some(RuleSeverity::Off)
        );
    }

    #[test]
    fn test_invalid_rule_id_is_fatal() {
        let result = parse_json(r#"{"lint": {"rules": {"skills": {"Skill_Name": "off"}}}}"#);
        assert!(matches!(result, Err(LintError::InvalidRuleId { .. })));
    }

    #[test]
    fn test_invalid_severity_is_fatal() {
        let result = parse_json(r#"{"lint": {"rules": {"skills": {"skill/missing-name": "loud"}}}}"#);
        assert!(matches!(result, Err(LintError::InvalidSeverity { .. })));
    }

    #[test]
    fn test_unknown_target_is_fatal() {
        let result = parse_json(r#"{"lint": {"rules": {"hooks": {}}}}"#);
        assert!(matches!(result, Err(LintError::ConfigParse { .. })));
    }

    #[test]
    fn test_other_top_level_sections_are_ignored() {
        let config = parse_json(r#"{"scaffold": {"node": true}}"#).unwrap();
        assert_eq!(config, LintRulesConfig::default());
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new(".quillrc.json")), ConfigFormat::Json);
    }
}
