//! In-memory workspace shared by the integration tests

#![allow(dead_code)]

use quill_scanner::{
    DiscoveredInstructionFile, InstructionFormat, ScanError, ScanResult, Workspace,
};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Workspace whose files live in a map
#[derive(Debug, Default, Clone)]
pub struct MemoryWorkspace {
    files: BTreeMap<PathBuf, String>,
    instructions: Vec<DiscoveredInstructionFile>,
    skills: Vec<PathBuf>,
    agents: Vec<PathBuf>,
    commands: Vec<String>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instruction(mut self, path: &str, format: InstructionFormat, content: &str) -> Self {
        self.instructions
            .push(DiscoveredInstructionFile::new(path, format));
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    /// Instruction file that is discovered but cannot be read
    pub fn unreadable_instruction(mut self, path: &str) -> Self {
        self.instructions
            .push(DiscoveredInstructionFile::new(path, InstructionFormat::AgentsManifest));
        self
    }

    pub fn skill(mut self, path: &str, content: &str) -> Self {
        self.skills.push(PathBuf::from(path));
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn agent(mut self, path: &str, content: &str) -> Self {
        self.agents.push(PathBuf::from(path));
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn commands(mut self, commands: &[&str]) -> Self {
        self.commands = commands.iter().map(ToString::to_string).collect();
        self
    }
}

impl Workspace for MemoryWorkspace {
    fn instruction_files(&self) -> ScanResult<Vec<DiscoveredInstructionFile>> {
        Ok(self.instructions.clone())
    }

    fn skill_files(&self) -> ScanResult<Vec<PathBuf>> {
        Ok(self.skills.clone())
    }

    fn agent_files(&self) -> ScanResult<Vec<PathBuf>> {
        Ok(self.agents.clone())
    }

    fn mandatory_commands(&self) -> ScanResult<Vec<String>> {
        Ok(self.commands.clone())
    }

    fn read_to_string(&self, path: &Path) -> ScanResult<String> {
        self.files.get(path).cloned().ok_or_else(|| ScanError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not in memory workspace"),
        })
    }

    fn read_optional(&self, path: &Path) -> ScanResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}
