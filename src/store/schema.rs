//! Database schema initialization

use anyhow::Result;
use rusqlite::Connection;

/// Ensure the todos table exists
///
/// AUTOINCREMENT keeps deleted ids from being handed out again.
pub fn ensure_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            priority TEXT NOT NULL DEFAULT 'medium',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_todos_completed
        ON todos(completed, id);
        "#,
    )?;

    Ok(())
}
