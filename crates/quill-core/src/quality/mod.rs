//! Instruction quality analysis
//!
//! Scores how well the discovered instruction files document the
//! project's mandatory commands and turns the gaps into suggestions.

pub mod aggregate;
pub mod scorer;

use crate::error::LintResult;
use quill_scanner::parser::{DocumentModel, StructuralPatterns};
use quill_scanner::{DiscoveredInstructionFile, Workspace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

pub use aggregate::{best_across_files, overall_quality_score, suggestions_for};
pub use scorer::{score_command, FileCommandScore, FAILURE_KEYWORDS, LOOP_WINDOW_LINES};

/// Best scores of one mandatory command across every instruction file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandQualityScores {
    pub command_name: String,
    pub structural_context: u8,
    pub execution_clarity: u8,
    pub loop_completeness: u8,
    /// Mean of the three dimensions, rounded to two decimals
    pub composite_score: f64,
    /// File that produced the winning composite, `None` when undocumented
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_source_file: Option<PathBuf>,
    /// Line of the best occurrence within `best_source_file`
    #[serde(skip)]
    pub best_line: usize,
}

impl CommandQualityScores {
    /// Scores of a command no instruction file mentions
    #[must_use]
    pub fn undocumented(command: &str) -> Self {
        Self {
            command_name: command.to_string(),
            structural_context: 0,
            execution_clarity: 0,
            loop_completeness: 0,
            composite_score: 0.0,
            best_source_file: None,
            best_line: 1,
        }
    }

    #[must_use]
    pub fn from_file_score(command: &str, file: PathBuf, score: &FileCommandScore) -> Self {
        Self {
            command_name: command.to_string(),
            structural_context: u8::from(score.structural_context),
            execution_clarity: u8::from(score.execution_clarity),
            loop_completeness: u8::from(score.loop_completeness),
            composite_score: score.composite(),
            best_source_file: Some(file),
            best_line: score.best_line,
        }
    }

    #[must_use]
    pub fn is_documented(&self) -> bool {
        self.best_source_file.is_some()
    }
}

/// An instruction file that could not be turned into a document model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingError {
    pub file_path: PathBuf,
    pub error: String,
}

/// Improvement hint for one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub command: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

/// Result of analyzing a repository's instruction files
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionQualityResult {
    pub discovered_files: Vec<DiscoveredInstructionFile>,
    pub command_scores: Vec<CommandQualityScores>,
    pub overall_quality_score: u32,
    pub suggestions: Vec<Suggestion>,
    pub parsing_errors: Vec<ParsingError>,
}

/// An instruction file read and parsed
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub file: DiscoveredInstructionFile,
    pub content: String,
    pub model: DocumentModel,
}

/// Instruction quality analyzer
#[derive(Debug, Clone, Default)]
pub struct QualityAnalyzer {
    patterns: StructuralPatterns,
}

impl QualityAnalyzer {
    /// Create an analyzer using the default structural heading patterns
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_patterns(mut self, patterns: StructuralPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Discover, parse and score the workspace's instruction files
    ///
    /// # Errors
    /// Returns an error only if discovery itself fails. Unreadable files
    /// are recorded as parsing errors.
    pub fn analyze(&self, workspace: &dyn Workspace) -> LintResult<InstructionQualityResult> {
        let files = workspace.instruction_files()?;
        let commands = workspace.mandatory_commands()?;
        debug!(
            files = files.len(),
            commands = commands.len(),
            "analyzing instruction quality"
        );
        let (documents, parsing_errors) = self.load_documents(workspace, &files);
        Ok(self.analyze_documents(files, &documents, &commands, parsing_errors))
    }

    /// Read and parse every file, keeping discovery order
    pub fn load_documents(
        &self,
        workspace: &dyn Workspace,
        files: &[DiscoveredInstructionFile],
    ) -> (Vec<ParsedDocument>, Vec<ParsingError>) {
        let loaded: Vec<Result<ParsedDocument, ParsingError>> = files
            .par_iter()
            .map(|file| match workspace.read_to_string(&file.file_path) {
                Ok(content) => {
                    let model = DocumentModel::parse(&content, &self.patterns);
                    Ok(ParsedDocument {
                        file: file.clone(),
                        content,
                        model,
                    })
                }
                Err(e) => {
                    warn!(file = %file.file_path.display(), error = %e, "skipping unreadable instruction file");
                    Err(ParsingError {
                        file_path: file.file_path.clone(),
                        error: e.to_string(),
                    })
                }
            })
            .collect();

        let mut documents = Vec::with_capacity(loaded.len());
        let mut parsing_errors = Vec::new();
        for result in loaded {
            match result {
                Ok(document) => documents.push(document),
                Err(error) => parsing_errors.push(error),
            }
        }
        (documents, parsing_errors)
    }

    /// Score already parsed documents
    #[must_use]
    pub fn analyze_documents(
        &self,
        discovered_files: Vec<DiscoveredInstructionFile>,
        documents: &[ParsedDocument],
        commands: &[String],
        parsing_errors: Vec<ParsingError>,
    ) -> InstructionQualityResult {
        let command_scores: Vec<CommandQualityScores> = commands
            .par_iter()
            .map(|command| best_across_files(command, documents))
            .collect();

        let suggestions = command_scores.iter().flat_map(suggestions_for).collect();

        InstructionQualityResult {
            discovered_files,
            overall_quality_score: overall_quality_score(&command_scores),
            command_scores,
            suggestions,
            parsing_errors,
        }
    }
}
