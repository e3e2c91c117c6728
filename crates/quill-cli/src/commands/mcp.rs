//! `quill mcp`: line-delimited JSON-RPC 2.0 server on stdin/stdout

use crate::tools::{self, QuillTool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ToolContent {
    r#type: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct ToolCallResult {
    content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    is_error: bool,
}

/// Serve requests until stdin closes
pub fn run(root: &Path) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let tools = tools::all_tools();
    info!(root = %root.display(), "MCP server listening on stdio");

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Err(e) => Some(JsonRpcResponse::failure(
                None,
                PARSE_ERROR,
                format!("parse error: {e}"),
            )),
            Ok(raw) => handle_message(raw, &tools, root),
        };

        if let Some(response) = response {
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, &response)?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    info!("stdin closed, MCP server stopping");
    Ok(())
}

/// Handle one decoded message, `None` for notifications
fn handle_message(
    raw: Value,
    tools: &[Box<dyn QuillTool>],
    root: &Path,
) -> Option<JsonRpcResponse> {
    // Notifications carry no id and get no response
    if !raw.as_object().is_some_and(|o| o.contains_key("id")) {
        debug!("ignoring notification");
        return None;
    }

    match serde_json::from_value::<JsonRpcRequest>(raw) {
        Ok(request) => Some(handle_request(&request, tools, root)),
        Err(e) => Some(JsonRpcResponse::failure(
            None,
            INVALID_REQUEST,
            format!("invalid request: {e}"),
        )),
    }
}

pub fn handle_request(
    req: &JsonRpcRequest,
    tools: &[Box<dyn QuillTool>],
    root: &Path,
) -> JsonRpcResponse {
    debug!(method = %req.method, "handling request");
    let id = req.id.clone();

    match req.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "quill",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),

        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();
            JsonRpcResponse::success(id, serde_json::json!({ "tools": tool_list }))
        }

        "tools/call" => {
            let Some(params) = &req.params else {
                return JsonRpcResponse::failure(id, INVALID_PARAMS, "missing params");
            };
            let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
                return JsonRpcResponse::failure(id, INVALID_PARAMS, "missing tool name in params");
            };
            let args = params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

            let Some(tool) = tools.iter().find(|t| t.name() == tool_name) else {
                return JsonRpcResponse::failure(
                    id,
                    METHOD_NOT_FOUND,
                    format!("tool not found: {tool_name}"),
                );
            };

            let (text, is_error) = match tool.call(args, root) {
                Ok(value) => match serde_json::to_string_pretty(&value) {
                    Ok(text) => (text, false),
                    Err(e) => (format!("serialization error: {e}"), true),
                },
                Err(e) => (e, true),
            };
            if is_error {
                debug!(tool = tool_name, error = %text, "tool call failed");
            }

            let call_result = ToolCallResult {
                content: vec![ToolContent {
                    r#type: "text",
                    text,
                }],
                is_error,
            };
            match serde_json::to_value(&call_result) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::failure(
                    id,
                    INVALID_REQUEST,
                    format!("serialization error: {e}"),
                ),
            }
        }

        other => JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("method not found: {other}")),
    }
}
