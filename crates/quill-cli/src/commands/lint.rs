//! `quill lint`

use anyhow::Context;
use clap::{Args, ValueEnum};
use quill_core::config::{load_rules_config, ConfigFormat};
use quill_core::lint::{has_errors, run_lint, LintTarget};
use quill_core::output::{render, OutputFormat};
use quill_core::util::validate_target_dir;
use quill_core::LintRulesConfig;
use quill_scanner::FsWorkspace;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Repository to lint
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Lint skills (`SKILL.md`)
    #[arg(long)]
    pub skills: bool,

    /// Lint agent definitions
    #[arg(long)]
    pub agents: bool,

    /// Lint instruction files and score their quality
    #[arg(long)]
    pub instructions: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    pub format: FormatArg,

    /// Rules config file (default: quill.config.* or .quillrc.json in PATH)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl LintArgs {
    /// Selected targets, empty when no target flag was given
    fn targets(&self) -> Vec<LintTarget> {
        [
            (self.skills, LintTarget::Skill),
            (self.agents, LintTarget::Agent),
            (self.instructions, LintTarget::Instruction),
        ]
        .into_iter()
        .filter_map(|(selected, target)| selected.then_some(target))
        .collect()
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Human,
    Json,
    Rdjsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Human => Self::Human,
            FormatArg::Json => Self::Json,
            FormatArg::Rdjsonl => Self::Rdjsonl,
        }
    }
}

/// Run the linter and print the report
///
/// Returns whether the run is free of error diagnostics.
pub fn execute(args: &LintArgs) -> anyhow::Result<bool> {
    let root = validate_target_dir(&args.path).context("Invalid target directory")?;
    let workspace = FsWorkspace::new(&root);

    let rules = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            LintRulesConfig::parse(&content, ConfigFormat::from_path(path), path)?
        }
        None => load_rules_config(&workspace)?,
    };

    let targets = args.targets();
    debug!(root = %root.display(), ?targets, "running lint");
    let outputs = run_lint(&workspace, &targets, &rules)?;

    let rendered = render(&outputs, args.format.into())?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(!has_errors(&outputs))
}
