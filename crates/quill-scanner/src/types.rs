//! Shared types for the Quill scanner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of instruction file, determined by where it lives in the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstructionFormat {
    /// Repository-wide `.github/copilot-instructions.md`
    CopilotInstructions,
    /// Path-scoped `.github/instructions/*.instructions.md`
    ScopedInstructions,
    /// Custom agent definition `.github/agents/*.md`
    AgentDefinition,
    /// Generic `AGENTS.md` manifest
    AgentsManifest,
    /// Assistant memory file `CLAUDE.md`
    ClaudeMemory,
}

impl InstructionFormat {
    /// Stable identifier used in JSON output and CLI arguments
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CopilotInstructions => "copilot-instructions",
            Self::ScopedInstructions => "scoped-instructions",
            Self::AgentDefinition => "agent-definition",
            Self::AgentsManifest => "agents-manifest",
            Self::ClaudeMemory => "claude-memory",
        }
    }

    /// Whether files of this kind must open with a frontmatter block
    #[must_use]
    pub fn requires_frontmatter(self) -> bool {
        matches!(self, Self::ScopedInstructions)
    }
}

impl fmt::Display for InstructionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstructionFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "copilot-instructions" => Ok(Self::CopilotInstructions),
            "scoped-instructions" => Ok(Self::ScopedInstructions),
            "agent-definition" => Ok(Self::AgentDefinition),
            "agents-manifest" => Ok(Self::AgentsManifest),
            "claude-memory" => Ok(Self::ClaudeMemory),
            _ => Err(format!("Invalid instruction format: {s}")),
        }
    }
}

/// An instruction file found during discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredInstructionFile {
    /// Path relative to the workspace root
    pub file_path: PathBuf,
    /// Kind of instruction file
    pub format: InstructionFormat,
}

impl DiscoveredInstructionFile {
    pub fn new(file_path: impl Into<PathBuf>, format: InstructionFormat) -> Self {
        Self {
            file_path: file_path.into(),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trips_through_str() {
        for format in [
            InstructionFormat::CopilotInstructions,
            InstructionFormat::ScopedInstructions,
            InstructionFormat::AgentDefinition,
            InstructionFormat::AgentsManifest,
            InstructionFormat::ClaudeMemory,
        ] {
            assert_eq!(format.as_str().parse::<InstructionFormat>(), Ok(format));
        }
        assert!("readme".parse::<InstructionFormat>().is_err());
    }

    #[test]
    fn test_discovered_file_serializes_camel_case() {
        let file = DiscoveredInstructionFile::new(
            ".github/copilot-instructions.md",
            InstructionFormat::CopilotInstructions,
        );
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["filePath"], ".github/copilot-instructions.md");
        assert_eq!(json["format"], "copilot-instructions");
    }
}
