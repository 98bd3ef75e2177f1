//! REST API handlers

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::state::AppState;
use crate::error::StoreError;
use crate::tools::dispatch;
use crate::tools::params::CreateTodoParams;
use crate::types::{NewTodo, Priority, Todo, UpdateFields};

fn default_true() -> bool {
    true
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub todos: usize,
    pub chat_configured: bool,
}

/// Map a store error onto an HTTP status and JSON body
pub(super) fn error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Internal(_) => {
            tracing::error!("Store operation failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Parse a JSON request body, treating an empty body as an empty object.
/// Malformed bodies come back as 400, not axum's default 422.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, (StatusCode, Json<ErrorResponse>)> {
    let value: Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(body).map_err(|e| {
            error_response(StoreError::Validation(format!("invalid body: {}", e)))
        })?
    };

    dispatch::parse_arguments(value).map_err(error_response)
}

/// Query parameters for listing todos
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub completed: Option<bool>,
}

/// List todos, optionally filtered by completion state
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Todo>>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.list(query.completed) {
        Ok(todos) => Ok(Json(todos)),
        Err(e) => Err(error_response(e)),
    }
}

/// Create a new todo
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), (StatusCode, Json<ErrorResponse>)> {
    let req: CreateTodoParams = parse_body(&body)?;

    match state.store.create(NewTodo {
        title: req.title,
        description: req.description,
        priority: req.priority,
    }) {
        Ok(todo) => Ok((StatusCode::CREATED, Json(todo))),
        Err(e) => Err(error_response(e)),
    }
}

/// Get a todo by ID
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.get(id) {
        Ok(todo) => Ok(Json(todo)),
        Err(e) => Err(error_response(e)),
    }
}

/// Update todo request body
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

/// Update a todo's title, description, or priority
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Todo>, (StatusCode, Json<ErrorResponse>)> {
    let req: UpdateTodoRequest = parse_body(&body)?;

    match state.store.update(
        id,
        UpdateFields {
            title: req.title,
            description: req.description,
            priority: req.priority,
        },
    ) {
        Ok(todo) => Ok(Json(todo)),
        Err(e) => Err(error_response(e)),
    }
}

/// Delete a todo
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.delete(id) {
        Ok(()) => Ok(Json(json!({"deleted": true, "id": id}))),
        Err(e) => Err(error_response(e)),
    }
}

/// Mark complete request body
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkCompleteRequest {
    #[serde(default = "default_true")]
    pub completed: bool,
}

/// Mark a todo complete (or incomplete with {"completed": false})
pub async fn mark_complete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Todo>, (StatusCode, Json<ErrorResponse>)> {
    let req: MarkCompleteRequest = parse_body(&body)?;

    match state.store.set_completed(id, req.completed) {
        Ok(todo) => Ok(Json(todo)),
        Err(e) => Err(error_response(e)),
    }
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.list(None) {
        Ok(todos) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
            backend: state.backend.to_string(),
            todos: todos.len(),
            chat_configured: state.relay.is_some(),
        })),
        Err(e) => Err(error_response(e)),
    }
}
