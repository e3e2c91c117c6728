//! Built-in lint rules and their default severities

use crate::lint::{LintTarget, Severity};

/// A built-in rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Stable `<namespace>/<rule-name>` identifier
    pub id: &'static str,
    pub target: LintTarget,
    /// Severity when the rules config does not override it
    pub severity: Severity,
}

const fn rule(id: &'static str, target: LintTarget, severity: Severity) -> Rule {
    Rule {
        id,
        target,
        severity,
    }
}

pub mod skill {
    use super::{rule, Rule};
    use crate::lint::{LintTarget::Skill, Severity::Error};

    pub const MISSING_FRONTMATTER: Rule = rule("skill/missing-frontmatter", Skill, Error);
    pub const INVALID_FRONTMATTER: Rule = rule("skill/invalid-frontmatter", Skill, Error);
    pub const MISSING_NAME: Rule = rule("skill/missing-name", Skill, Error);
    pub const INVALID_NAME: Rule = rule("skill/invalid-name", Skill, Error);
    pub const NAME_MISMATCH: Rule = rule("skill/name-mismatch", Skill, Error);
    pub const MISSING_DESCRIPTION: Rule = rule("skill/missing-description", Skill, Error);
    pub const INVALID_DESCRIPTION: Rule = rule("skill/invalid-description", Skill, Error);
    pub const INVALID_ALLOWED_TOOLS: Rule = rule("skill/invalid-allowed-tools", Skill, Error);

    pub const ALL: &[Rule] = &[
        MISSING_FRONTMATTER,
        INVALID_FRONTMATTER,
        MISSING_NAME,
        INVALID_NAME,
        NAME_MISMATCH,
        MISSING_DESCRIPTION,
        INVALID_DESCRIPTION,
        INVALID_ALLOWED_TOOLS,
    ];
}

pub mod agent {
    use super::{rule, Rule};
    use crate::lint::{
        LintTarget::Agent,
        Severity::{Error, Warning},
    };

    pub const MISSING_FRONTMATTER: Rule = rule("agent/missing-frontmatter", Agent, Error);
    pub const INVALID_FRONTMATTER: Rule = rule("agent/invalid-frontmatter", Agent, Error);
    pub const INVALID_NAME: Rule = rule("agent/invalid-name", Agent, Error);
    pub const NAME_MISMATCH: Rule = rule("agent/name-mismatch", Agent, Warning);
    pub const MISSING_DESCRIPTION: Rule = rule("agent/missing-description", Agent, Error);
    pub const INVALID_DESCRIPTION: Rule = rule("agent/invalid-description", Agent, Error);
    pub const INVALID_TOOLS: Rule = rule("agent/invalid-tools", Agent, Error);
    pub const INVALID_MODEL: Rule = rule("agent/invalid-model", Agent, Error);

    pub const ALL: &[Rule] = &[
        MISSING_FRONTMATTER,
        INVALID_FRONTMATTER,
        INVALID_NAME,
        NAME_MISMATCH,
        MISSING_DESCRIPTION,
        INVALID_DESCRIPTION,
        INVALID_TOOLS,
        INVALID_MODEL,
    ];
}

pub mod instruction {
    use super::{rule, Rule};
    use crate::lint::{
        LintTarget::Instruction,
        Severity::{Error, Warning},
    };

    pub const MISSING_STRUCTURAL_CONTEXT: Rule =
        rule("instruction/missing-structural-context", Instruction, Warning);
    pub const MISSING_EXECUTION_CLARITY: Rule =
        rule("instruction/missing-execution-clarity", Instruction, Warning);
    pub const MISSING_LOOP_COMPLETENESS: Rule =
        rule("instruction/missing-loop-completeness", Instruction, Warning);
    pub const COMMAND_NOT_DOCUMENTED: Rule =
        rule("instruction/command-not-documented", Instruction, Warning);
    pub const PARSE_ERROR: Rule = rule("instruction/parse-error", Instruction, Error);
    pub const INVALID_FRONTMATTER: Rule =
        rule("instruction/invalid-frontmatter", Instruction, Error);
    pub const MISSING_APPLY_TO: Rule = rule("instruction/missing-apply-to", Instruction, Warning);

    pub const ALL: &[Rule] = &[
        MISSING_STRUCTURAL_CONTEXT,
        MISSING_EXECUTION_CLARITY,
        MISSING_LOOP_COMPLETENESS,
        COMMAND_NOT_DOCUMENTED,
        PARSE_ERROR,
        INVALID_FRONTMATTER,
        MISSING_APPLY_TO,
    ];
}

/// Built-in rules of one target
#[must_use]
pub fn builtin(target: LintTarget) -> &'static [Rule] {
    match target {
        LintTarget::Skill => skill::ALL,
        LintTarget::Agent => agent::ALL,
        LintTarget::Instruction => instruction::ALL,
    }
}
