//! docfmt tool server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. One request per line; requests
//! without an `id` are notifications and get no response. Logs go to
//! stderr so stdout carries only protocol traffic.
//!
//! Methods: initialize, ping, tools/list, tools/call
//!
//! Tools:
//! - decode: canonical config -> form model
//! - encode: form model -> canonical config
//! - validate: check one value against its field rule
//! - nearest_size: traditional size name for a point size
//! - parse_measure: free-form measurement -> points
//! - check_config: structural and range report for a canonical config
//! - has_changes: compare a form model with the saved config

mod builtins;
mod context;
mod registry;
mod tools;

use std::io::{self, BufRead, Write};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use docfmt_core::{codes, FormatError};

use context::ToolContext;
use registry::ToolRegistry;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "docfmt";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl RpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        RpcError { code, message: message.into(), data: None }
    }

    fn invalid_params(err: FormatError) -> Self {
        RpcError {
            code: INVALID_PARAMS,
            message: err.to_string(),
            data: serde_json::to_value(&err).ok(),
        }
    }
}

impl RpcResponse {
    fn reply(id: Option<JsonValue>, result: Result<JsonValue, RpcError>) -> Self {
        match result {
            Ok(r) => RpcResponse { jsonrpc: "2.0", id, result: Some(r), error: None },
            Err(e) => RpcResponse { jsonrpc: "2.0", id, result: None, error: Some(e) },
        }
    }
}

struct Server {
    registry: ToolRegistry,
    ctx: ToolContext,
}

impl Server {
    fn new(registry: ToolRegistry, ctx: ToolContext) -> Self {
        Server { registry, ctx }
    }

    /// Handle one input line. `None` when no response is due.
    fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let request: RpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!("error parsing request: {}", e);
                return Some(RpcResponse::reply(
                    None,
                    Err(RpcError::new(PARSE_ERROR, format!("Parse error: {}", e))),
                ));
            }
        };

        debug!(method = %request.method, "processing");
        let result = self.dispatch(&request);

        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(RpcResponse::reply(request.id, result))
    }

    fn dispatch(&self, request: &RpcRequest) -> Result<JsonValue, RpcError> {
        match request.method.as_str() {
            "initialize" => Ok(self.initialize(&request.params)),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list()),
            "tools/call" => self.tools_call(&request.params),
            _ => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        }
    }

    fn initialize(&self, params: &Option<JsonValue>) -> JsonValue {
        let client = params.as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");
        let protocol = params.as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        info!(client, protocol, "client connected");

        json!({
            "protocolVersion": protocol,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "description": "Document formatting units, conversion and validation"
            },
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "instructions": "All persisted lengths are point strings such as \"72pt\". Use decode to get editable values, encode to persist them."
        })
    }

    fn tools_list(&self) -> JsonValue {
        let tools: Vec<JsonValue> = self.registry.list().iter()
            .map(|meta| json!({
                "name": meta.name,
                "description": meta.description,
                "inputSchema": meta.input_schema(),
                "examples": meta.examples,
            }))
            .collect();
        json!({ "tools": tools })
    }

    fn tools_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let params = params.as_ref()
            .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Missing params"))?;
        let name = params.get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Missing tool name"))?;
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match self.registry.call_tool(name, &args, &self.ctx) {
            Ok(value) => Ok(json!({
                "content": [{ "type": "text", "text": value.to_string() }],
                "structuredContent": value,
                "isError": false
            })),
            Err(err) if err.code == codes::UNKNOWN_TOOL => Err(RpcError::invalid_params(err)),
            Err(err) => {
                debug!(tool = name, code = %err.code, "tool returned an error");
                Ok(json!({
                    "content": [{ "type": "text", "text": err.to_string() }],
                    "structuredContent": { "error": err },
                    "isError": true
                }))
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    init_logging();

    let ctx = ToolContext::from_env();
    let server = Server::new(builtins::standard_registry(), ctx);

    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        strategy = server.ctx.strategy_name(),
        tools = server.registry.len(),
        "docfmt server started"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(response) = server.handle_line(line) else {
                    continue;
                };

                let text = match serde_json::to_string(&response) {
                    Ok(t) => t,
                    Err(e) => {
                        error!("error serializing response: {}", e);
                        continue;
                    }
                };
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", text).and_then(|_| stdout.flush()) {
                    error!("error writing response: {}", e);
                    break;
                }
            }
            Err(e) => {
                error!("error reading input: {}", e);
                break;
            }
        }
    }

    info!("server shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(builtins::standard_registry(), ToolContext::default())
    }

    fn roundtrip(line: &str) -> Option<JsonValue> {
        server().handle_line(line).map(|r| serde_json::to_value(&r).unwrap())
    }

    #[test]
    fn test_ping() {
        let out = roundtrip(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).unwrap();
        assert_eq!(out, json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
    }

    #[test]
    fn test_notification_gets_no_response() {
        assert!(roundtrip(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).is_none());
    }

    #[test]
    fn test_parse_error() {
        let out = roundtrip("{oops").unwrap();
        assert_eq!(out["error"]["code"], json!(PARSE_ERROR));
    }

    #[test]
    fn test_unknown_method() {
        let out = roundtrip(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#).unwrap();
        assert_eq!(out["error"]["code"], json!(METHOD_NOT_FOUND));
        assert_eq!(out["id"], json!("a"));
    }

    #[test]
    fn test_tools_list() {
        let out = roundtrip(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).unwrap();
        let tools = out["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        let validate = tools.iter().find(|t| t["name"] == "validate").unwrap();
        assert_eq!(validate["inputSchema"]["required"], json!(["value", "unit", "field"]));
    }

    #[test]
    fn test_tools_call() {
        let out = roundtrip(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nearest_size","arguments":{"points":10.5}}}"#,
        )
        .unwrap();
        assert_eq!(out["result"]["isError"], json!(false));
        assert_eq!(out["result"]["structuredContent"]["name"], json!("五号"));
    }

    #[test]
    fn test_tool_error_is_result() {
        let out = roundtrip(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"validate","arguments":{"value":1}}}"#,
        )
        .unwrap();
        assert_eq!(out["result"]["isError"], json!(true));
        assert_eq!(out["result"]["structuredContent"]["error"]["code"], json!(codes::ARG_MISSING));
    }

    #[test]
    fn test_unknown_tool_is_invalid_params() {
        let out = roundtrip(
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"decod","arguments":{}}}"#,
        )
        .unwrap();
        assert_eq!(out["error"]["code"], json!(INVALID_PARAMS));
        assert_eq!(out["error"]["data"]["code"], json!(codes::UNKNOWN_TOOL));
    }
}
