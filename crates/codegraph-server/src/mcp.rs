//! MCP (Model Context Protocol) JSON-RPC server over stdin/stdout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SharedCodeGraph;

#[derive(Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    method: String,
    params: Option<Value>,
    id: Option<Value>,
}

#[derive(Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

#[derive(Serialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Serialize, Deserialize)]
struct ToolInfo {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

fn tool_list() -> Vec<ToolInfo> {
    vec![
        ToolInfo {
            name: "codegraph/index".into(),
            description: "Index the repository, fully or scoped to named paths".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "paths": { "type": "array", "items": { "type": "string" } },
                    "incremental": { "type": "boolean" }
                }
            }),
        },
        ToolInfo {
            name: "codegraph/query".into(),
            description: "Run a raw query against the graph store".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "required": ["query"],
                "properties": { "query": { "type": "string" } }
            }),
        },
        ToolInfo {
            name: "codegraph/clean".into(),
            description: "Drop every row from the graph store, optionally removing its directory".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": { "delete_dir": { "type": "boolean" } }
            }),
        },
        ToolInfo {
            name: "codegraph/getFuncParamTypes".into(),
            description: "Resolve the source snippets of a function's parameter types".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "required": ["file_path", "line"],
                "properties": {
                    "file_path": { "type": "string" },
                    "line": { "type": "integer" }
                }
            }),
        },
    ]
}

fn dispatch(graph: &SharedCodeGraph, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
    match method {
        "initialize" => Ok(serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": "codegraph",
                "version": env!("CARGO_PKG_VERSION")
            }
        })),
        "tools/list" => serde_json::to_value(tool_list()).map_err(internal_err),
        "codegraph/index" => handle_index(graph, params),
        "codegraph/query" => handle_query(graph, params),
        "codegraph/clean" => handle_clean(graph, params),
        "codegraph/getFuncParamTypes" => handle_func_param_types(graph, params),
        _ => Err(JsonRpcError { code: -32601, message: format!("Method not found: {method}") }),
    }
}

fn handle_index(graph: &SharedCodeGraph, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let paths: Vec<std::path::PathBuf> = params
        .as_ref()
        .and_then(|p| p.get("paths"))
        .and_then(|p| p.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).map(std::path::PathBuf::from).collect())
        .unwrap_or_default();
    let incremental = params.as_ref().and_then(|p| p.get("incremental")).and_then(|v| v.as_bool()).unwrap_or(false);

    let mut graph = graph.lock().map_err(lock_err)?;
    let files_visited = graph.index(&paths, incremental).map_err(internal_err)?;
    Ok(serde_json::json!({ "files_visited": files_visited }))
}

fn handle_query(graph: &SharedCodeGraph, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let query = params
        .as_ref()
        .and_then(|p| p.get("query"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("missing required field: query"))?;
    let graph = graph.lock().map_err(lock_err)?;
    let rows = graph.query(query).map_err(internal_err)?;
    Ok(serde_json::json!({ "rows": rows }))
}

fn handle_clean(graph: &SharedCodeGraph, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let delete_dir = params.as_ref().and_then(|p| p.get("delete_dir")).and_then(|v| v.as_bool()).unwrap_or(false);
    let mut graph = graph.lock().map_err(lock_err)?;
    graph.clean(delete_dir).map_err(internal_err)?;
    Ok(serde_json::json!({ "ok": true }))
}

fn handle_func_param_types(graph: &SharedCodeGraph, params: Option<Value>) -> Result<Value, JsonRpcError> {
    let file_path = params
        .as_ref()
        .and_then(|p| p.get("file_path"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid_params("missing required field: file_path"))?;
    let line = params
        .as_ref()
        .and_then(|p| p.get("line"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| invalid_params("missing required field: line"))? as u32;

    let graph = graph.lock().map_err(lock_err)?;
    let snippets = graph.get_func_param_types(file_path, line);
    serde_json::to_value(snippets).map_err(internal_err)
}

fn invalid_params(message: &str) -> JsonRpcError {
    JsonRpcError { code: -32602, message: message.to_string() }
}

fn internal_err(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError { code: -32000, message: e.to_string() }
}

fn lock_err<T>(_: std::sync::PoisonError<T>) -> JsonRpcError {
    JsonRpcError { code: -32000, message: "graph store lock poisoned".to_string() }
}

/// Process a single JSON-RPC line and return the response JSON string
/// (empty for notifications, which carry no `id`).
pub fn process_line(graph: &SharedCodeGraph, line: &str) -> String {
    if line.trim().is_empty() {
        return String::new();
    }

    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            let response = JsonRpcResponse {
                jsonrpc: "2.0".into(),
                result: None,
                error: Some(JsonRpcError { code: -32700, message: format!("parse error: {e}") }),
                id: Value::Null,
            };
            return serde_json::to_string(&response).unwrap_or_default();
        }
    };

    let id = request.id.clone().unwrap_or(Value::Null);
    match dispatch(graph, &request.method, request.params) {
        Ok(result) => {
            serde_json::to_string(&JsonRpcResponse { jsonrpc: "2.0".into(), result: Some(result), error: None, id })
                .unwrap_or_default()
        }
        Err(error) => {
            serde_json::to_string(&JsonRpcResponse { jsonrpc: "2.0".into(), result: None, error: Some(error), id })
                .unwrap_or_default()
        }
    }
}
