//! # REST API Errors
//!
//! The error dispatcher: every failure a handler can produce is classified
//! here into a status code and a client-facing `msg`, written once.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::news::NewsError;
use crate::observability::Event;

pub const INVALID_DATA_TYPE: &str = "Bad request - invalid data type";

pub const ROUTE_NOT_FOUND: &str = "Not found - this path does not exist";

pub const INTERNAL_ERROR: &str = "Internal server error";

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Coarse failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Structured failure raised deliberately by an operation
    #[error("{0}")]
    BadRequest(String),

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// The store rejected a value for its column type
    #[error("{}", INVALID_DATA_TYPE)]
    InvalidDataType,

    /// No route matched the request path
    #[error("{}", ROUTE_NOT_FOUND)]
    RouteNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Anything else. The detail is logged, never sent.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestError::BadRequest(_) | RestError::InvalidDataType => ErrorKind::BadRequest,
            RestError::NotFound(_) | RestError::RouteNotFound => ErrorKind::NotFound,
            RestError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message clients see
    pub fn message(&self) -> String {
        match self {
            RestError::Internal(_) => INTERNAL_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<NewsError> for RestError {
    fn from(err: NewsError) -> Self {
        match err {
            NewsError::BadRequest(msg) => RestError::BadRequest(msg),
            NewsError::NotFound(msg) => RestError::NotFound(msg),
            NewsError::Store(e) if e.is_type_mismatch() => RestError::InvalidDataType,
            NewsError::Store(e) => RestError::Internal(e.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self { msg: err.message() }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::Internal(ref detail) = self {
            tracing::error!(event = %Event::RequestFailed, error = %detail, "internal server error");
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
