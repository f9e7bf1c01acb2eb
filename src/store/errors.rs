//! # Store Errors
//!
//! Error types reported by query executors.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A parameter value does not fit the column type it is compared with
    /// or written to (PostgreSQL `22P02` / `22003`).
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// No connection could be checked out of the pool
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Any other fault reported by the database driver
    #[error("database error: {0}")]
    Database(String),

    /// A result column has a type the row decoder does not handle
    #[error("unsupported column type {type_name} for column {column}")]
    UnsupportedColumn { column: String, type_name: String },

    /// The in-memory executor was handed a statement it does not know
    #[error("unknown statement: {0}")]
    UnknownStatement(String),
}

impl StoreError {
    /// True for the type-mismatch condition the HTTP layer maps to 400
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, StoreError::TypeMismatch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_detection() {
        let err = StoreError::TypeMismatch("banana".to_string());
        assert!(err.is_type_mismatch());
        assert!(!StoreError::Database("boom".to_string()).is_type_mismatch());
    }

    #[test]
    fn test_display() {
        let err = StoreError::UnsupportedColumn {
            column: "tags".to_string(),
            type_name: "jsonb".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported column type jsonb for column tags");
    }
}
