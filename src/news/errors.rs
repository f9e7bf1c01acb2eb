//! # News Errors
//!
//! Structured failures raised by the data access operations. Driver faults
//! are carried through untouched so the HTTP layer can classify them.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for news operations
pub type NewsResult<T> = Result<T, NewsError>;

/// News operation errors
#[derive(Debug, Clone, Error)]
pub enum NewsError {
    /// Malformed or invalid input
    #[error("{0}")]
    BadRequest(String),

    /// A referenced entity is absent
    #[error("{0}")]
    NotFound(String),

    /// Raised by the store
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl NewsError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        NewsError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        NewsError::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_verbatim() {
        assert_eq!(NewsError::bad_request("Bad request").to_string(), "Bad request");
        assert_eq!(
            NewsError::not_found("no article of this ID in database").to_string(),
            "no article of this ID in database"
        );
    }

    #[test]
    fn test_store_errors_convert() {
        let err: NewsError = StoreError::TypeMismatch("x".to_string()).into();
        assert!(matches!(err, NewsError::Store(ref e) if e.is_type_mismatch()));
    }
}
