//! SQLite-backed store

use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::{params, types::FromSqlError, Connection, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use super::{schema, validate_title, TodoStore};
use crate::error::{StoreError, StoreResult};
use crate::types::{NewTodo, Priority, Todo, UpdateFields};

/// Todo store backed by a single SQLite table
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path and ensure the schema
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {:?}", path))?;

        schema::ensure_tables(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn fetch(conn: &Connection, id: i64) -> StoreResult<Todo> {
        let todo = conn
            .query_row(
                r#"
                SELECT id, title, description, priority, completed, created_at
                FROM todos
                WHERE id = ?1
                "#,
                params![id],
                row_to_todo,
            )
            .optional()?;

        todo.ok_or(StoreError::NotFound(id))
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let priority_str: String = row.get(3)?;
    let priority = Priority::from_str(&priority_str)
        .map_err(|e| FromSqlError::Other(format!("{}", e).into()))?;

    let created_str: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map_err(|e| FromSqlError::Other(format!("invalid created_at: {}", e).into()))?
        .with_timezone(&Utc);

    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority,
        completed: row.get(4)?,
        created_at,
    })
}

impl TodoStore for SqliteStore {
    fn create(&self, new: NewTodo) -> StoreResult<Todo> {
        let title = validate_title(&new.title)?;
        let description = new.description.unwrap_or_default();
        let priority = new.priority.unwrap_or_default();
        let created_at = Utc::now();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO todos (title, description, priority, completed, created_at)
            VALUES (?1, ?2, ?3, 0, ?4)
            "#,
            params![&title, &description, priority.as_str(), created_at.to_rfc3339()],
        )?;

        Ok(Todo {
            id: conn.last_insert_rowid(),
            title,
            description,
            priority,
            completed: false,
            created_at,
        })
    }

    fn list(&self, completed: Option<bool>) -> StoreResult<Vec<Todo>> {
        let conn = self.conn.lock().unwrap();

        let todos = match completed {
            Some(flag) => {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, title, description, priority, completed, created_at
                    FROM todos
                    WHERE completed = ?1
                    ORDER BY id ASC
                    "#,
                )?;
                let rows = stmt.query_map(params![flag], row_to_todo)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, title, description, priority, completed, created_at
                    FROM todos
                    ORDER BY id ASC
                    "#,
                )?;
                let rows = stmt.query_map([], row_to_todo)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(todos)
    }

    fn get(&self, id: i64) -> StoreResult<Todo> {
        let conn = self.conn.lock().unwrap();
        Self::fetch(&conn, id)
    }

    fn update(&self, id: i64, fields: UpdateFields) -> StoreResult<Todo> {
        let title = match &fields.title {
            Some(t) => Some(validate_title(t)?),
            None => None,
        };

        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            r#"
            UPDATE todos
            SET title = COALESCE(?1, title),
                description = COALESCE(?2, description),
                priority = COALESCE(?3, priority)
            WHERE id = ?4
            "#,
            params![
                title,
                fields.description,
                fields.priority.map(|p| p.as_str().to_string()),
                id
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Self::fetch(&conn, id)
    }

    fn set_completed(&self, id: i64, completed: bool) -> StoreResult<Todo> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE todos SET completed = ?1 WHERE id = ?2",
            params![completed, id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Self::fetch(&conn, id)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}
