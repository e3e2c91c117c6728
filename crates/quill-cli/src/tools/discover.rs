use super::{target_dir_schema, workspace_for, QuillTool};
use quill_scanner::Workspace;
use serde_json::Value;
use std::path::Path;

pub struct DiscoverInstructionFilesTool;

impl QuillTool for DiscoverInstructionFilesTool {
    fn name(&self) -> &str {
        "discover_instruction_files"
    }

    fn description(&self) -> &str {
        "List the agent instruction files found in the repository with their formats"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "targetDir": target_dir_schema()
            }
        })
    }

    fn call(&self, args: Value, root: &Path) -> Result<Value, String> {
        let files = workspace_for(&args, root)?
            .instruction_files()
            .map_err(|e| e.to_string())?;
        serde_json::to_value(files).map_err(|e| e.to_string())
    }
}
