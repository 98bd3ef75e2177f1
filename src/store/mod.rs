//! Task store: one trait, two interchangeable backends
//!
//! `MemoryStore` keeps an ordered in-process collection; `SqliteStore`
//! keeps a single relational table. Everything above the trait is
//! backend-agnostic.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::{StoreError, StoreResult};
use crate::types::{NewTodo, Todo, UpdateFields};

/// Storage contract for todo records
///
/// The store exclusively owns the collection; callers receive snapshots.
/// Both backends guard their state with a single mutex, so concurrent
/// requests cannot corrupt the id sequence or the collection.
pub trait TodoStore: Send + Sync {
    /// Insert a new todo and return the stored snapshot
    fn create(&self, new: NewTodo) -> StoreResult<Todo>;

    /// All todos, optionally filtered by completion, in creation order
    fn list(&self, completed: Option<bool>) -> StoreResult<Vec<Todo>>;

    /// Fetch one todo by id
    fn get(&self, id: i64) -> StoreResult<Todo>;

    /// Partial update of title, description, and priority
    fn update(&self, id: i64, fields: UpdateFields) -> StoreResult<Todo>;

    /// Set the completion flag; idempotent
    fn set_completed(&self, id: i64, completed: bool) -> StoreResult<Todo>;

    /// Remove a todo permanently
    fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Trim and validate a title; both backends share this rule
fn validate_title(title: &str) -> StoreResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation("title must not be empty"));
    }
    Ok(trimmed.to_string())
}
