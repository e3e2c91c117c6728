//! Workspace access
//!
//! The [`Workspace`] trait is the only way the lint and quality engines
//! see a repository. [`FsWorkspace`] implements it on top of the real
//! filesystem; tests substitute in-memory fakes.
//!
//! All returned paths are relative to the workspace root. A missing
//! directory yields an empty list, never an error.

use crate::error::{ScanError, ScanResult};
use crate::parser::parse_package_json;
use crate::types::{DiscoveredInstructionFile, InstructionFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const PACKAGE_MANIFEST: &str = "package.json";
const SKILL_FILE: &str = "SKILL.md";
const SKILL_ROOTS: &[&str] = &[".github/skills", ".claude/skills"];
const AGENT_ROOTS: &[&str] = &[".github/agents", ".claude/agents"];

/// Read-only view of a repository
pub trait Workspace: Sync {
    /// Instruction files in discovery order
    fn instruction_files(&self) -> ScanResult<Vec<DiscoveredInstructionFile>>;

    /// `SKILL.md` files, one per skill directory
    fn skill_files(&self) -> ScanResult<Vec<PathBuf>>;

    /// Agent definition files
    fn agent_files(&self) -> ScanResult<Vec<PathBuf>>;

    /// Commands the project treats as its mandatory feedback loop
    fn mandatory_commands(&self) -> ScanResult<Vec<String>>;

    /// Read a file relative to the workspace root
    fn read_to_string(&self, path: &Path) -> ScanResult<String>;

    /// Read a file if it exists
    fn read_optional(&self, path: &Path) -> ScanResult<Option<String>>;
}

/// Filesystem-backed workspace rooted at a directory
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).is_file()
    }

    /// Files directly or recursively under `dir` accepted by `keep`, sorted by path
    fn collect_files(
        &self,
        dir: &str,
        max_depth: usize,
        keep: impl Fn(&Path) -> bool,
    ) -> ScanResult<Vec<PathBuf>> {
        let base = self.root.join(dir);
        if !base.is_dir() {
            debug!(dir = %base.display(), "directory not present, skipping");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&base)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() || !keep(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| ScanError::InvalidPath(entry.path().display().to_string()))?;
            files.push(relative.to_path_buf());
        }
        Ok(files)
    }
}

fn has_markdown_extension(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "md")
}

impl Workspace for FsWorkspace {
    fn instruction_files(&self) -> ScanResult<Vec<DiscoveredInstructionFile>> {
        let mut files = Vec::new();

        if self.exists(".github/copilot-instructions.md") {
            files.push(DiscoveredInstructionFile::new(
                ".github/copilot-instructions.md",
                InstructionFormat::CopilotInstructions,
            ));
        }

        for path in self.collect_files(".github/instructions", usize::MAX, |p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".instructions.md"))
        })? {
            files.push(DiscoveredInstructionFile::new(
                path,
                InstructionFormat::ScopedInstructions,
            ));
        }

        for path in self.collect_files(".github/agents", 1, has_markdown_extension)? {
            files.push(DiscoveredInstructionFile::new(
                path,
                InstructionFormat::AgentDefinition,
            ));
        }

        if self.exists("AGENTS.md") {
            files.push(DiscoveredInstructionFile::new(
                "AGENTS.md",
                InstructionFormat::AgentsManifest,
            ));
        }
        if self.exists("CLAUDE.md") {
            files.push(DiscoveredInstructionFile::new(
                "CLAUDE.md",
                InstructionFormat::ClaudeMemory,
            ));
        }

        debug!(count = files.len(), "discovered instruction files");
        Ok(files)
    }

    fn skill_files(&self) -> ScanResult<Vec<PathBuf>> {
        let mut skills = Vec::new();
        for dir in SKILL_ROOTS {
            skills.extend(self.collect_files(dir, 2, |p| {
                p.file_name().is_some_and(|n| n == SKILL_FILE)
            })?);
        }
        // Only `<root>/<skill>/SKILL.md`, not a stray file at the root
        skills.retain(|p| {
            p.parent()
                .is_some_and(|parent| !SKILL_ROOTS.iter().any(|r| parent == Path::new(r)))
        });
        debug!(count = skills.len(), "discovered skills");
        Ok(skills)
    }

    fn agent_files(&self) -> ScanResult<Vec<PathBuf>> {
        let mut agents = Vec::new();
        for dir in AGENT_ROOTS {
            agents.extend(self.collect_files(dir, 1, has_markdown_extension)?);
        }
        debug!(count = agents.len(), "discovered agents");
        Ok(agents)
    }

    fn mandatory_commands(&self) -> ScanResult<Vec<String>> {
        let manifest = Path::new(PACKAGE_MANIFEST);
        let Some(content) = self.read_optional(manifest)? else {
            debug!("no package.json, no mandatory commands");
            return Ok(Vec::new());
        };
        match parse_package_json(manifest, &content) {
            Ok(commands) => Ok(commands),
            Err(e) => {
                warn!("{e}; treating project as having no mandatory commands");
                Ok(Vec::new())
            }
        }
    }

    fn read_to_string(&self, path: &Path) -> ScanResult<String> {
        let full = self.root.join(path);
        fs::read_to_string(&full).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_optional(&self, path: &Path) -> ScanResult<Option<String>> {
        let full = self.root.join(path);
        if full.is_file() {
            self.read_to_string(path).map(Some)
        } else {
            Ok(None)
        }
    }
}
