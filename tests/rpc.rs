//! Integration tests for the JSON-RPC tool dispatch protocol
//!
//! Drives the full stack from raw request values down to the store,
//! for both the in-memory and SQLite backends.

use serde_json::{json, Value};
use todo_mcp::rpc;
use todo_mcp::store::{MemoryStore, SqliteStore, TodoStore};

/// Drive one request through the RPC layer and return the response JSON
async fn rpc_call(store: &dyn TodoStore, request: Value) -> Value {
    let response = rpc::handle_request(store, request)
        .await
        .expect("expected a response");
    serde_json::to_value(response).unwrap()
}

/// Build a tools/call request
fn call_request(id: i64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

// ============================================================================
// HAPPY PATHS
// ============================================================================

#[tokio::test]
async fn create_returns_the_full_task() {
    let store = MemoryStore::new();

    let body = rpc_call(
        &store,
        call_request(
            1,
            "create_todo",
            json!({"title": "Buy milk", "priority": "high"}),
        ),
    )
    .await;

    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert!(body.get("error").is_none());

    let task = &body["result"];
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["completed"], false);
    assert_eq!(task["description"], "");
    assert!(task["id"].is_i64());
    assert!(task["created_at"].is_string());
}

#[tokio::test]
async fn list_includes_created_task_verbatim() {
    let store = MemoryStore::new();

    let created = rpc_call(&store, call_request(1, "create_todo", json!({"title": "a"}))).await;

    let listed = rpc_call(&store, call_request(2, "list_todos", json!({}))).await;
    let tasks = listed["result"].as_array().unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], created["result"]);
}

#[tokio::test]
async fn list_filters_by_completed() {
    let store = MemoryStore::new();

    let a = rpc_call(&store, call_request(1, "create_todo", json!({"title": "a"}))).await;
    rpc_call(&store, call_request(2, "create_todo", json!({"title": "b"}))).await;
    let a_id = a["result"]["id"].as_i64().unwrap();

    rpc_call(
        &store,
        call_request(3, "mark_todo_complete", json!({"id": a_id})),
    )
    .await;

    let done = rpc_call(
        &store,
        call_request(4, "list_todos", json!({"completed": true})),
    )
    .await;
    let tasks = done["result"].as_array().unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], a_id);
}

#[tokio::test]
async fn update_edits_only_the_given_fields() {
    let store = MemoryStore::new();

    let created = rpc_call(
        &store,
        call_request(
            1,
            "create_todo",
            json!({"title": "draft", "description": "keep me"}),
        ),
    )
    .await;
    let id = created["result"]["id"].as_i64().unwrap();

    let updated = rpc_call(
        &store,
        call_request(2, "update_todo", json!({"id": id, "title": "final"})),
    )
    .await;

    assert_eq!(updated["result"]["title"], "final");
    assert_eq!(updated["result"]["description"], "keep me");
    assert_eq!(
        updated["result"]["created_at"],
        created["result"]["created_at"]
    );
}

#[tokio::test]
async fn mark_complete_defaults_to_true_and_is_idempotent() {
    let store = MemoryStore::new();

    let created = rpc_call(&store, call_request(1, "create_todo", json!({"title": "x"}))).await;
    let id = created["result"]["id"].as_i64().unwrap();

    let first = rpc_call(
        &store,
        call_request(2, "mark_todo_complete", json!({"id": id})),
    )
    .await;
    let second = rpc_call(
        &store,
        call_request(3, "mark_todo_complete", json!({"id": id})),
    )
    .await;

    assert_eq!(first["result"]["completed"], true);
    assert_eq!(first["result"], second["result"]);
}

#[tokio::test]
async fn delete_returns_the_deletion_marker() {
    let store = MemoryStore::new();

    let created = rpc_call(&store, call_request(1, "create_todo", json!({"title": "x"}))).await;
    let id = created["result"]["id"].as_i64().unwrap();

    let deleted = rpc_call(&store, call_request(2, "delete_todo", json!({"id": id}))).await;

    assert_eq!(deleted["result"], json!({"deleted": true, "id": id}));

    let listed = rpc_call(&store, call_request(3, "list_todos", json!({}))).await;
    assert_eq!(listed["result"], json!([]));
}

// ============================================================================
// PROTOCOL METHODS
// ============================================================================

#[tokio::test]
async fn initialize_reports_server_info() {
    let store = MemoryStore::new();

    let body = rpc_call(
        &store,
        json!({"jsonrpc": "2.0", "id": "init-1", "method": "initialize"}),
    )
    .await;

    assert_eq!(body["id"], "init-1");
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(
        body["result"]["capabilities"]["tools"]["listChanged"],
        false
    );
    assert_eq!(body["result"]["serverInfo"]["name"], "todo-mcp-server");
    assert!(body["result"]["serverInfo"]["version"].is_string());
}

#[tokio::test]
async fn tools_list_advertises_all_five_tools() {
    let store = MemoryStore::new();

    let body = rpc_call(
        &store,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    )
    .await;

    let tools = body["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();

    assert_eq!(
        names,
        vec![
            "create_todo",
            "list_todos",
            "update_todo",
            "delete_todo",
            "mark_todo_complete"
        ]
    );
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(tool["description"].is_string());
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[tokio::test]
async fn unknown_tool_is_method_not_found() {
    let store = MemoryStore::new();

    let body = rpc_call(&store, call_request(1, "frobnicate", json!({}))).await;

    assert_eq!(body["error"]["code"], -32601);
    assert_eq!(body["error"]["message"], "unknown tool: frobnicate");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn empty_title_is_invalid_params_and_creates_nothing() {
    let store = MemoryStore::new();

    let body = rpc_call(&store, call_request(1, "create_todo", json!({"title": "  "}))).await;

    assert_eq!(body["error"]["code"], -32602);
    assert_eq!(body["error"]["message"], "title must not be empty");

    let listed = rpc_call(&store, call_request(2, "list_todos", json!({}))).await;
    assert_eq!(listed["result"], json!([]));
}

#[tokio::test]
async fn unknown_argument_field_is_invalid_params() {
    let store = MemoryStore::new();

    let body = rpc_call(
        &store,
        call_request(1, "create_todo", json!({"title": "x", "urgency": 5})),
    )
    .await;

    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid arguments:"));
}

#[tokio::test]
async fn invalid_priority_is_invalid_params() {
    let store = MemoryStore::new();

    let body = rpc_call(
        &store,
        call_request(1, "create_todo", json!({"title": "x", "priority": "urgent"})),
    )
    .await;

    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn missing_id_maps_to_todo_not_found_code() {
    let store = MemoryStore::new();

    let body = rpc_call(
        &store,
        call_request(1, "update_todo", json!({"id": 99, "title": "nope"})),
    )
    .await;

    assert_eq!(body["error"]["code"], 1001);
    assert_eq!(body["error"]["message"], "todo not found: 99");

    let listed = rpc_call(&store, call_request(2, "list_todos", json!({}))).await;
    assert_eq!(listed["result"], json!([]));
}

#[tokio::test]
async fn parse_error_gets_null_id() {
    let store = MemoryStore::new();

    let response = rpc::handle_body(&store, b"{\"jsonrpc\": ").await.unwrap();
    let body = serde_json::to_value(response).unwrap();

    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn notification_produces_no_response() {
    let store = MemoryStore::new();

    let response = rpc::handle_request(
        &store,
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;

    assert!(response.is_none());
}

// ============================================================================
// SQLITE BACKEND
// ============================================================================

#[tokio::test]
async fn sqlite_backend_serves_the_same_protocol() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("todos.db")).unwrap();

    let created = rpc_call(
        &store,
        call_request(1, "create_todo", json!({"title": "persist me"})),
    )
    .await;
    let id = created["result"]["id"].as_i64().unwrap();

    let completed = rpc_call(
        &store,
        call_request(2, "mark_todo_complete", json!({"id": id})),
    )
    .await;
    assert_eq!(completed["result"]["completed"], true);

    rpc_call(&store, call_request(3, "delete_todo", json!({"id": id}))).await;

    let gone = rpc_call(
        &store,
        call_request(4, "delete_todo", json!({"id": id})),
    )
    .await;
    assert_eq!(gone["error"]["code"], 1001);

    // Deleted ids are never handed out again
    let next = rpc_call(
        &store,
        call_request(5, "create_todo", json!({"title": "after"})),
    )
    .await;
    assert!(next["result"]["id"].as_i64().unwrap() > id);
}
