//! Parameter types for tool calls
//!
//! Each struct doubles as the JSON schema advertised by `tools/list`.
//! Unknown fields are rejected rather than silently dropped.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::Priority;

fn default_true() -> bool {
    true
}

/// Arguments for `create_todo`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoParams {
    /// Title of the todo item
    pub title: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Priority level (low, medium, or high; defaults to medium)
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Arguments for `list_todos`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListTodosParams {
    /// Only return todos with this completion state
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Arguments for `update_todo`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoParams {
    /// ID of the todo to update
    pub id: i64,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New priority level
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Arguments for `delete_todo`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeleteTodoParams {
    /// ID of the todo to delete
    pub id: i64,
}

/// Arguments for `mark_todo_complete`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MarkTodoCompleteParams {
    /// ID of the todo to mark
    pub id: i64,
    /// Completion state to set (defaults to true)
    #[serde(default = "default_true")]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_params_minimal() {
        let params: CreateTodoParams =
            serde_json::from_value(json!({"title": "Buy milk"})).unwrap();

        assert_eq!(params.title, "Buy milk");
        assert!(params.description.is_none());
        assert!(params.priority.is_none());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<CreateTodoParams, _> =
            serde_json::from_value(json!({"title": "x", "prio": "high"}));

        assert!(result.is_err());
    }

    #[test]
    fn test_mark_complete_defaults_to_true() {
        let params: MarkTodoCompleteParams = serde_json::from_value(json!({"id": 3})).unwrap();

        assert_eq!(params.id, 3);
        assert!(params.completed);
    }

    #[test]
    fn test_mark_complete_accepts_explicit_false() {
        let params: MarkTodoCompleteParams =
            serde_json::from_value(json!({"id": 3, "completed": false})).unwrap();

        assert!(!params.completed);
    }

    #[test]
    fn test_invalid_priority_is_rejected() {
        let result: Result<CreateTodoParams, _> =
            serde_json::from_value(json!({"title": "x", "priority": "urgent"}));

        assert!(result.is_err());
    }
}
