//! In-memory store for tests and ephemeral runs

use chrono::Utc;
use std::sync::Mutex;

use super::{validate_title, TodoStore};
use crate::error::{StoreError, StoreResult};
use crate::types::{NewTodo, Todo, UpdateFields};

/// Todo store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    todos: Vec<Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    fn create(&self, new: NewTodo) -> StoreResult<Todo> {
        let title = validate_title(&new.title)?;

        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;

        let todo = Todo {
            id: inner.next_id,
            title,
            description: new.description.unwrap_or_default(),
            priority: new.priority.unwrap_or_default(),
            completed: false,
            created_at: Utc::now(),
        };
        inner.todos.push(todo.clone());

        Ok(todo)
    }

    fn list(&self, completed: Option<bool>) -> StoreResult<Vec<Todo>> {
        let inner = self.inner.lock().unwrap();
        let todos = inner
            .todos
            .iter()
            .filter(|t| completed.map_or(true, |flag| t.completed == flag))
            .cloned()
            .collect();

        Ok(todos)
    }

    fn get(&self, id: i64) -> StoreResult<Todo> {
        let inner = self.inner.lock().unwrap();
        inner
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&self, id: i64, fields: UpdateFields) -> StoreResult<Todo> {
        let title = match &fields.title {
            Some(t) => Some(validate_title(t)?),
            None => None,
        };

        let mut inner = self.inner.lock().unwrap();
        let todo = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(description) = fields.description {
            todo.description = description;
        }
        if let Some(priority) = fields.priority {
            todo.priority = priority;
        }

        Ok(todo.clone())
    }

    fn set_completed(&self, id: i64, completed: bool) -> StoreResult<Todo> {
        let mut inner = self.inner.lock().unwrap();
        let todo = inner
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        todo.completed = completed;

        Ok(todo.clone())
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let position = inner
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        inner.todos.remove(position);

        Ok(())
    }
}
