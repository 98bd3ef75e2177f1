//! Todo tracker with a REST API, MCP tool dispatch, and an optional chat relay
//!
//! The same five operations are reachable three ways: REST routes under
//! /api/todos, a JSON-RPC 2.0 endpoint at /mcp, and direct HTTP tool
//! routes under /mcp/tools. All of them share one store and one
//! dispatch table.

pub mod chat;
pub mod error;
pub mod rpc;
pub mod store;
pub mod tools;
pub mod types;
pub mod web;

pub use error::{StoreError, StoreResult};
pub use store::{MemoryStore, SqliteStore, TodoStore};
pub use types::{NewTodo, Priority, Todo, UpdateFields};
