use super::{target_dir_schema, workspace_for, QuillTool};
use quill_core::QualityAnalyzer;
use serde_json::Value;
use std::path::Path;

pub struct AnalyzeInstructionQualityTool;

impl QuillTool for AnalyzeInstructionQualityTool {
    fn name(&self) -> &str {
        "analyze_instruction_quality"
    }

    fn description(&self) -> &str {
        "Score how well the instruction files document the project's mandatory commands (structural context, execution clarity, loop completeness)"
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
        let workspace = workspace_for(&args, root)?;
        let result = QualityAnalyzer::new()
            .analyze(&workspace)
            .map_err(|e| e.to_string())?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}
