//! Tools exposed over MCP

use quill_core::util::validate_target_dir;
use quill_scanner::FsWorkspace;
use serde_json::Value;
use std::path::{Component, Path};

pub mod analyze;
pub mod discover;
pub mod lint;

pub trait QuillTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Value;
    fn call(&self, args: Value, root: &Path) -> Result<Value, String>;
}

pub fn all_tools() -> Vec<Box<dyn QuillTool>> {
    vec![
        Box::new(lint::LintTool),
        Box::new(analyze::AnalyzeInstructionQualityTool),
        Box::new(discover::DiscoverInstructionFilesTool),
    ]
}

/// Workspace for the call's `targetDir`, defaulting to the server root
pub(crate) fn workspace_for(args: &Value, root: &Path) -> Result<FsWorkspace, String> {
    match args.get("targetDir").and_then(Value::as_str) {
        Some(dir) => {
            let dir = validate_target_dir(Path::new(dir)).map_err(|e| e.to_string())?;
            // `join` would replace the root with an absolute path
            if dir.has_root()
                || dir
                    .components()
                    .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            {
                return Err(format!(
                    "targetDir must be relative to the server root: {}",
                    dir.display()
                ));
            }
            Ok(FsWorkspace::new(root.join(dir)))
        }
        None => Ok(FsWorkspace::new(root)),
    }
}

pub(crate) fn target_dir_schema() -> Value {
    serde_json::json!({
        "type": "string",
        "description": "Repository directory, relative to the server root (default: the server root)"
    })
}
