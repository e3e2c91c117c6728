//! Formatter tests over real lint output

mod common;

use common::MemoryWorkspace;
use quill_core::lint::run_lint;
use quill_core::output::{render, OutputFormat};
use quill_core::LintRulesConfig;

fn outputs() -> Vec<quill_core::LintOutput> {
    let workspace = MemoryWorkspace::new()
        .skill(".github/skills/foo/SKILL.md", "---\nname: foo\n---\n")
        .agent(
            ".github/agents/reviewer.md",
            "---\nname: reviewer\ndescription: Reviews code\n---\n",
        );
    run_lint(&workspace, &[], &LintRulesConfig::default()).unwrap()
}

#[test]
fn test_formats_agree_on_diagnostics() {
    let outputs = outputs();

    let json = render(&outputs, OutputFormat::Json).unwrap();
    let array: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(array.len(), 1);

    let rdjsonl = render(&outputs, OutputFormat::Rdjsonl).unwrap();
    assert_eq!(rdjsonl.lines().count(), 1);
    let line: serde_json::Value = serde_json::from_str(&rdjsonl).unwrap();
    assert_eq!(line["severity"], "ERROR");
    assert_eq!(line["code"]["value"], "skill/missing-description");
    assert_eq!(line["location"]["path"], ".github/skills/foo/SKILL.md");

    let human = render(&outputs, OutputFormat::Human).unwrap();
    assert!(human.contains("✖ .github/skills/foo/SKILL.md:1 [description]"));
    assert!(human.contains("✓ .github/agents/reviewer.md"));
    assert!(human.contains("No instruction files found"));
    assert!(human.contains("Instruction quality: 100%"));
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("rdjsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Rdjsonl);
    assert!("xml".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::default(), OutputFormat::Human);
}
