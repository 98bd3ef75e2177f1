//! JSON-RPC 2.0 envelope handling
//!
//! Implements the tool dispatch protocol: `initialize`,
//! `notifications/initialized`, `tools/list`, and `tools/call`.
//! Every response travels over HTTP 200; failures are expressed in the
//! `error` member of the envelope, never as HTTP status codes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::tools::{self, dispatch, ToolName};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "todo-mcp-server";

// Reserved JSON-RPC error codes
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// Application-level codes live outside the reserved range
pub const TODO_NOT_FOUND: i64 = 1001;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Map a store error onto its protocol error code
pub fn error_code(err: &StoreError) -> i64 {
    match err {
        StoreError::Validation(_) => INVALID_PARAMS,
        StoreError::NotFound(_) => TODO_NOT_FOUND,
        StoreError::Internal(_) => INTERNAL_ERROR,
    }
}

/// Handle a raw request body. Returns `None` for notifications.
pub async fn handle_body(store: &dyn TodoStore, body: &[u8]) -> Option<RpcResponse> {
    let request: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            return Some(RpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("parse error: {}", e),
            ));
        }
    };

    handle_request(store, request).await
}

/// Handle a parsed request value. Returns `None` for notifications.
pub async fn handle_request(store: &dyn TodoStore, request: Value) -> Option<RpcResponse> {
    // Keep the id even if the envelope itself turns out to be malformed.
    let id = request.get("id").cloned().unwrap_or(Value::Null);

    let request: RpcRequest = match serde_json::from_value(request) {
        Ok(req) => req,
        Err(e) => {
            return Some(RpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("invalid request: {}", e),
            ));
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Some(RpcResponse::error(
            id,
            INVALID_REQUEST,
            format!("invalid request: unsupported jsonrpc version {:?}", request.jsonrpc),
        ));
    }

    tracing::debug!(method = %request.method, "rpc request");

    match request.method.as_str() {
        "initialize" => Some(RpcResponse::ok(request.id, initialize_result())),
        "notifications/initialized" => None,
        "tools/list" => Some(RpcResponse::ok(
            request.id,
            json!({"tools": tools::descriptors()}),
        )),
        "tools/call" => Some(handle_tool_call(store, request.id, request.params).await),
        other => Some(RpcResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            format!("method not found: {}", other),
        )),
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {"listChanged": false}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn handle_tool_call(store: &dyn TodoStore, id: Value, params: Value) -> RpcResponse {
    let params: ToolCallParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return RpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {}", e));
        }
    };

    let tool = match ToolName::from_str(&params.name) {
        Ok(tool) => tool,
        Err(e) => {
            return RpcResponse::error(id, METHOD_NOT_FOUND, e.to_string());
        }
    };

    match dispatch::call_tool(store, tool, params.arguments).await {
        Ok(result) => RpcResponse::ok(id, result),
        Err(e) => {
            if matches!(e, StoreError::Internal(_)) {
                tracing::error!(tool = %tool, error = %e, "tool call failed");
            }
            RpcResponse::error(id, error_code(&e), e.to_string())
        }
    }
}
