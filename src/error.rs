//! Error taxonomy shared by every surface
//!
//! The three variants map onto the REST statuses (400/404/500) and onto
//! the JSON-RPC error codes; the store itself never sees either mapping.

use thiserror::Error;

/// Type alias for store operation results
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the task store and tool dispatch
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed or constraint-violating input; always client-caused
    #[error("{0}")]
    Validation(String),

    /// No todo with the given id
    #[error("todo not found: {0}")]
    NotFound(i64),

    /// Persistence failure or other unexpected error
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    /// Shorthand for a validation error with a message
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Internal(anyhow::Error::new(e))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Internal(anyhow::Error::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_passthrough() {
        let err = StoreError::validation("title must not be empty");
        assert_eq!(err.to_string(), "title must not be empty");
    }

    #[test]
    fn test_not_found_includes_id() {
        let err = StoreError::NotFound(42);
        assert_eq!(err.to_string(), "todo not found: 42");
    }
}
