//! Tool dispatch
//!
//! Maps a tool name plus JSON arguments onto the store and returns the
//! operation result as plain JSON. Both the JSON-RPC endpoint and the
//! direct HTTP tool routes go through here.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::params::{
    CreateTodoParams, DeleteTodoParams, ListTodosParams, MarkTodoCompleteParams, UpdateTodoParams,
};
use super::ToolName;
use crate::error::{StoreError, StoreResult};
use crate::store::TodoStore;
use crate::types::{NewTodo, UpdateFields};

/// Parse tool arguments, reporting malformed input as a validation error
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> StoreResult<T> {
    serde_json::from_value(arguments)
        .map_err(|e| StoreError::Validation(format!("invalid arguments: {}", e)))
}

/// Execute a tool call against the store
pub async fn call_tool(
    store: &dyn TodoStore,
    tool: ToolName,
    arguments: Value,
) -> StoreResult<Value> {
    // A missing or null arguments object means "no arguments".
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other,
    };

    let result = match tool {
        ToolName::CreateTodo => {
            let params: CreateTodoParams = parse_arguments(arguments)?;
            let todo = store.create(NewTodo {
                title: params.title,
                description: params.description,
                priority: params.priority,
            })?;
            serde_json::to_value(todo)?
        }
        ToolName::ListTodos => {
            let params: ListTodosParams = parse_arguments(arguments)?;
            let todos = store.list(params.completed)?;
            serde_json::to_value(todos)?
        }
        ToolName::UpdateTodo => {
            let params: UpdateTodoParams = parse_arguments(arguments)?;
            let todo = store.update(
                params.id,
                UpdateFields {
                    title: params.title,
                    description: params.description,
                    priority: params.priority,
                },
            )?;
            serde_json::to_value(todo)?
        }
        ToolName::DeleteTodo => {
            let params: DeleteTodoParams = parse_arguments(arguments)?;
            store.delete(params.id)?;
            json!({"deleted": true, "id": params.id})
        }
        ToolName::MarkTodoComplete => {
            let params: MarkTodoCompleteParams = parse_arguments(arguments)?;
            let todo = store.set_completed(params.id, params.completed)?;
            serde_json::to_value(todo)?
        }
    };

    Ok(result)
}
