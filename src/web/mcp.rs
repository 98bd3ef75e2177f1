//! Tool dispatch endpoints
//!
//! POST /mcp speaks JSON-RPC 2.0. The /mcp/tools/* routes expose each
//! tool directly over plain HTTP for curl-friendly use; both paths go
//! through the same dispatch table.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::api::{self, ErrorResponse, ListQuery};
use super::state::AppState;
use crate::error::StoreError;
use crate::rpc;
use crate::tools::{self, dispatch, ToolName};

/// JSON-RPC 2.0 endpoint. Notifications get 204, everything else 200.
pub async fn rpc_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    match rpc::handle_body(state.store.as_ref(), &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Server metadata and tool directory
pub async fn mcp_info() -> Json<Value> {
    let tools: Vec<Value> = tools::descriptors()
        .into_iter()
        .map(|descriptor| {
            let method = if descriptor.name == "list_todos" {
                "GET, POST"
            } else {
                "POST"
            };
            json!({
                "name": descriptor.name,
                "description": descriptor.description,
                "endpoint": format!("/mcp/tools/{}", descriptor.name),
                "method": method,
            })
        })
        .collect();

    Json(json!({
        "name": rpc::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Todo tracker tool dispatch endpoint",
        "protocolVersion": rpc::PROTOCOL_VERSION,
        "endpoint": "/mcp",
        "tools": tools,
    }))
}

async fn direct_call(
    state: &AppState,
    tool: ToolName,
    body: &[u8],
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let arguments: Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(body).map_err(|e| {
            api::error_response(StoreError::Validation(format!("invalid body: {}", e)))
        })?
    };

    match dispatch::call_tool(state.store.as_ref(), tool, arguments).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err(api::error_response(e)),
    }
}

/// POST /mcp/tools/create_todo
pub async fn call_create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    direct_call(&state, ToolName::CreateTodo, &body).await
}

/// POST /mcp/tools/list_todos
pub async fn call_list_todos(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    direct_call(&state, ToolName::ListTodos, &body).await
}

/// GET /mcp/tools/list_todos
pub async fn call_list_todos_get(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let arguments = match query.completed {
        Some(flag) => json!({"completed": flag}),
        None => json!({}),
    };

    match dispatch::call_tool(state.store.as_ref(), ToolName::ListTodos, arguments).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err(api::error_response(e)),
    }
}

/// POST /mcp/tools/update_todo
pub async fn call_update_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    direct_call(&state, ToolName::UpdateTodo, &body).await
}

/// POST /mcp/tools/delete_todo
pub async fn call_delete_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    direct_call(&state, ToolName::DeleteTodo, &body).await
}

/// POST /mcp/tools/mark_todo_complete
pub async fn call_mark_todo_complete(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    direct_call(&state, ToolName::MarkTodoComplete, &body).await
}
