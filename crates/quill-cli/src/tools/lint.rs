use super::{target_dir_schema, workspace_for, QuillTool};
use quill_core::config::load_rules_config;
use quill_core::lint::{run_lint, LintTarget};
use serde_json::Value;
use std::path::Path;

pub struct LintTool;

impl QuillTool for LintTool {
    fn name(&self) -> &str {
        "lint"
    }

    fn description(&self) -> &str {
        "Lint skills, agent definitions and instruction files; returns one result per target with diagnostics and a summary"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "targetDir": target_dir_schema(),
                "targets": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["skills", "agents", "instructions"] },
                    "description": "Targets to lint (default: all)"
                }
            }
        })
    }

    fn call(&self, args: Value, root: &Path) -> Result<Value, String> {
        let workspace = workspace_for(&args, root)?;

        let targets = match args.get("targets") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| format!("target must be a string, got {item}"))?
                        .parse::<LintTarget>()
                })
                .collect::<Result<Vec<_>, String>>()?,
            Some(other) => return Err(format!("targets must be an array, got {other}")),
        };

        let rules = load_rules_config(&workspace).map_err(|e| e.to_string())?;
        let outputs = run_lint(&workspace, &targets, &rules).map_err(|e| e.to_string())?;
        serde_json::to_value(outputs).map_err(|e| e.to_string())
    }
}
