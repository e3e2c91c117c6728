//! Workspace discovery tests
//!
//! Tests filesystem discovery against fixture directories.

use quill_scanner::{FsWorkspace, InstructionFormat, Workspace};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(base: &Path, relative: &str, content: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture directory");
    fs::write(path, content).expect("Failed to write fixture file");
}

/// Create a repository with every kind of instruction file
fn create_test_fixture() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let base = temp_dir.path();

    write(base, ".github/copilot-instructions.md", "# Copilot\n");
    write(
        base,
        ".github/instructions/rust.instructions.md",
        "---\napplyTo: \"**/*.rs\"\n---\n",
    );
    write(
        base,
        ".github/instructions/nested/ts.instructions.md",
        "---\napplyTo: \"**/*.ts\"\n---\n",
    );
    write(base, ".github/instructions/notes.md", "ignored\n");
    write(
        base,
        ".github/agents/reviewer.md",
        "---\ndescription: Reviews\n---\n",
    );
    write(base, "AGENTS.md", "# Agents\n");
    write(base, "CLAUDE.md", "# Memory\n");
    write(
        base,
        ".github/skills/deploy/SKILL.md",
        "---\nname: deploy\ndescription: Deploys\n---\n",
    );
    write(base, ".github/skills/SKILL.md", "stray\n");
    write(
        base,
        ".claude/skills/release/SKILL.md",
        "---\nname: release\n---\n",
    );
    write(base, ".claude/agents/helper.md", "---\nname: helper\n---\n");
    write(
        base,
        "package.json",
        r#"{"scripts": {"test": "jest", "start": "node .", "build": "tsc"}}"#,
    );

    temp_dir
}

#[test]
fn test_instruction_files_in_discovery_order() {
    let fixture = create_test_fixture();
    let workspace = FsWorkspace::new(fixture.path());

    let files = workspace.instruction_files().unwrap();
    let found: Vec<(PathBuf, InstructionFormat)> =
        files.into_iter().map(|f| (f.file_path, f.format)).collect();

    assert_eq!(
        found,
        vec![
            (
                PathBuf::from(".github/copilot-instructions.md"),
                InstructionFormat::CopilotInstructions
            ),
            (
                PathBuf::from(".github/instructions/nested/ts.instructions.md"),
                InstructionFormat::ScopedInstructions
            ),
            (
                PathBuf::from(".github/instructions/rust.instructions.md"),
                InstructionFormat::ScopedInstructions
            ),
            (
                PathBuf::from(".github/agents/reviewer.md"),
                InstructionFormat::AgentDefinition
            ),
            (PathBuf::from("AGENTS.md"), InstructionFormat::AgentsManifest),
            (PathBuf::from("CLAUDE.md"), InstructionFormat::ClaudeMemory),
        ]
    );
}

#[test]
fn test_skill_and_agent_files() {
    let fixture = create_test_fixture();
    let workspace = FsWorkspace::new(fixture.path());

    assert_eq!(
        workspace.skill_files().unwrap(),
        vec![
            PathBuf::from(".github/skills/deploy/SKILL.md"),
            PathBuf::from(".claude/skills/release/SKILL.md"),
        ]
    );
    assert_eq!(
        workspace.agent_files().unwrap(),
        vec![
            PathBuf::from(".github/agents/reviewer.md"),
            PathBuf::from(".claude/agents/helper.md"),
        ]
    );
}

#[test]
fn test_mandatory_commands_from_package_json() {
    let fixture = create_test_fixture();
    let workspace = FsWorkspace::new(fixture.path());
    assert_eq!(workspace.mandatory_commands().unwrap(), vec!["test", "build"]);
}

#[test]
fn test_malformed_manifest_means_no_commands() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "package.json", "{ not json");
    let workspace = FsWorkspace::new(temp_dir.path());
    assert!(workspace.mandatory_commands().unwrap().is_empty());
}

#[test]
fn test_missing_root_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = FsWorkspace::new(temp_dir.path().join("does-not-exist"));

    assert!(workspace.instruction_files().unwrap().is_empty());
    assert!(workspace.skill_files().unwrap().is_empty());
    assert!(workspace.agent_files().unwrap().is_empty());
    assert!(workspace.mandatory_commands().unwrap().is_empty());
}

#[test]
fn test_read_optional_and_read_to_string() {
    let fixture = create_test_fixture();
    let workspace = FsWorkspace::new(fixture.path());

    assert_eq!(
        workspace.read_optional(Path::new("AGENTS.md")).unwrap(),
        Some("# Agents\n".to_string())
    );
    assert_eq!(workspace.read_optional(Path::new("nope.md")).unwrap(), None);
    assert!(workspace.read_to_string(Path::new("nope.md")).is_err());
}
