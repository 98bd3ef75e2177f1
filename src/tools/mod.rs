//! Tool registry
//!
//! The five todo operations exposed through the tool dispatch surface.
//! Each tool has a stable name, a human-readable description, and a
//! JSON schema derived from its parameter struct.

pub mod dispatch;
pub mod params;

use schemars::{generate::SchemaSettings, JsonSchema};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use params::{
    CreateTodoParams, DeleteTodoParams, ListTodosParams, MarkTodoCompleteParams, UpdateTodoParams,
};

/// Error returned when a tool name does not match any registered tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseToolNameError(String);

impl fmt::Display for ParseToolNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tool: {}", self.0)
    }
}

impl std::error::Error for ParseToolNameError {}

/// The registered tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    CreateTodo,
    ListTodos,
    UpdateTodo,
    DeleteTodo,
    MarkTodoComplete,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::CreateTodo,
        ToolName::ListTodos,
        ToolName::UpdateTodo,
        ToolName::DeleteTodo,
        ToolName::MarkTodoComplete,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ToolName::CreateTodo => "create_todo",
            ToolName::ListTodos => "list_todos",
            ToolName::UpdateTodo => "update_todo",
            ToolName::DeleteTodo => "delete_todo",
            ToolName::MarkTodoComplete => "mark_todo_complete",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ToolName::CreateTodo => "Create a new todo item with a title, optional description, and optional priority",
            ToolName::ListTodos => "List todo items, optionally filtered by completion state",
            ToolName::UpdateTodo => "Update the title, description, or priority of an existing todo",
            ToolName::DeleteTodo => "Delete a todo item by ID",
            ToolName::MarkTodoComplete => "Mark a todo item as complete (or incomplete)",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ParseToolNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_todo" => Ok(ToolName::CreateTodo),
            "list_todos" => Ok(ToolName::ListTodos),
            "update_todo" => Ok(ToolName::UpdateTodo),
            "delete_todo" => Ok(ToolName::DeleteTodo),
            "mark_todo_complete" => Ok(ToolName::MarkTodoComplete),
            other => Err(ParseToolNameError(other.to_string())),
        }
    }
}

/// Tool metadata as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Descriptors for all registered tools, in registry order
pub fn descriptors() -> Vec<ToolDescriptor> {
    ToolName::ALL
        .iter()
        .map(|tool| ToolDescriptor {
            name: tool.as_str().to_string(),
            description: tool.description().to_string(),
            input_schema: match tool {
                ToolName::CreateTodo => inline_schema::<CreateTodoParams>(),
                ToolName::ListTodos => inline_schema::<ListTodosParams>(),
                ToolName::UpdateTodo => inline_schema::<UpdateTodoParams>(),
                ToolName::DeleteTodo => inline_schema::<DeleteTodoParams>(),
                ToolName::MarkTodoComplete => inline_schema::<MarkTodoCompleteParams>(),
            },
        })
        .collect()
}

/// Generate a self-contained draft-07 schema with no $defs references
fn inline_schema<T: JsonSchema>() -> Value {
    let mut settings = SchemaSettings::draft07();
    settings.meta_schema = None;
    settings.inline_subschemas = true;

    let schema = settings.into_generator().into_root_schema_for::<T>();
    serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_tools_registered() {
        let descriptors = descriptors();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();

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
    }

    #[test]
    fn test_tool_name_round_trips() {
        for tool in ToolName::ALL {
            assert_eq!(ToolName::from_str(tool.as_str()).unwrap(), tool);
        }
    }

    #[test]
    fn test_unknown_tool_name_error_message() {
        let err = ToolName::from_str("frobnicate").unwrap_err();
        assert_eq!(err.to_string(), "unknown tool: frobnicate");
    }

    #[test]
    fn test_create_schema_shape() {
        let descriptors = descriptors();
        let schema = &descriptors[0].input_schema;

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["title"]);

        let priority = &schema["properties"]["priority"];
        let rendered = serde_json::to_string(priority).unwrap();
        assert!(rendered.contains("low"));
        assert!(rendered.contains("medium"));
        assert!(rendered.contains("high"));
    }

    #[test]
    fn test_mark_complete_schema_requires_only_id() {
        let descriptors = descriptors();
        let schema = &descriptors[4].input_schema;

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["id"]);
    }

    #[test]
    fn test_descriptors_have_descriptions() {
        for descriptor in descriptors() {
            assert!(!descriptor.description.is_empty());
        }
    }
}
