//! # Request Parser
//!
//! Adapts raw request parts (query maps, body bytes) into the inputs the
//! news operations take.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::news::payload::{Fields, KEY_MISSING};
use crate::news::query::BAD_REQUEST;
use crate::news::RawArticleQuery;

use super::errors::{RestError, RestResult};

/// How write endpoints treat a body with no keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBodyPolicy {
    /// Answer 204 and write nothing
    #[default]
    NoContent,
    /// Answer 400 as for any missing key
    Reject,
}

/// A classified request body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Zero-length body or `{}`
    Empty,
    /// An object with at least one key
    Fields(Fields),
}

impl Payload {
    /// Classify raw body bytes.
    ///
    /// Anything that is not a JSON object is rejected.
    pub fn parse(bytes: &[u8]) -> RestResult<Self> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Payload::Empty);
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(fields)) if fields.is_empty() => Ok(Payload::Empty),
            Ok(Value::Object(fields)) => Ok(Payload::Fields(fields)),
            Ok(_) | Err(_) => Err(RestError::BadRequest(BAD_REQUEST.to_string())),
        }
    }

    /// Fields for an endpoint that has no empty-body convention
    pub fn into_fields(self) -> Fields {
        match self {
            Payload::Empty => Fields::new(),
            Payload::Fields(fields) => fields,
        }
    }

    /// Fields for an insert endpoint, or `None` when the body is empty and
    /// the policy says to answer with no content
    pub fn for_insert(self, policy: EmptyBodyPolicy) -> RestResult<Option<Fields>> {
        match (self, policy) {
            (Payload::Fields(fields), _) => Ok(Some(fields)),
            (Payload::Empty, EmptyBodyPolicy::NoContent) => Ok(None),
            (Payload::Empty, EmptyBodyPolicy::Reject) => {
                Err(RestError::BadRequest(KEY_MISSING.to_string()))
            }
        }
    }
}

/// A single path segment such as an id or username.
///
/// Segments that cannot be decoded are reported through the error
/// dispatcher rather than as a plain-text rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PathParam {
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<PathRejection> for RestError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "path segment rejected");
        RestError::InvalidDataType
    }
}

/// Pull the listing parameters out of a query map. Unknown keys are ignored.
pub fn article_query(params: &HashMap<String, String>) -> RawArticleQuery {
    RawArticleQuery {
        topic: params.get("topic").cloned(),
        sort_by: params.get("sort_by").cloned(),
        order: params.get("order").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bodies() {
        assert_eq!(Payload::parse(b"").unwrap(), Payload::Empty);
        assert_eq!(Payload::parse(b"  \n").unwrap(), Payload::Empty);
        assert_eq!(Payload::parse(b"{}").unwrap(), Payload::Empty);
    }

    #[test]
    fn test_fields_body() {
        match Payload::parse(br#"{"inc_votes": 1}"#).unwrap() {
            Payload::Fields(fields) => assert_eq!(fields["inc_votes"], 1),
            Payload::Empty => panic!("expected fields"),
        }
    }

    #[test]
    fn test_non_object_bodies_rejected() {
        assert!(Payload::parse(b"[1, 2]").is_err());
        assert!(Payload::parse(b"{not json").is_err());
        assert!(Payload::parse(b"42").is_err());
    }

    #[test]
    fn test_empty_body_policy() {
        assert_eq!(Payload::Empty.for_insert(EmptyBodyPolicy::NoContent).unwrap(), None);

        let err = Payload::Empty.for_insert(EmptyBodyPolicy::Reject).unwrap_err();
        assert_eq!(err.message(), KEY_MISSING);
    }

    #[test]
    fn test_policy_serde() {
        let policy: EmptyBodyPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, EmptyBodyPolicy::Reject);
        assert_eq!(EmptyBodyPolicy::default(), EmptyBodyPolicy::NoContent);
    }

    #[test]
    fn test_article_query_ignores_unknown_keys() {
        let mut params = HashMap::new();
        params.insert("topic".to_string(), "cats".to_string());
        params.insert("limit".to_string(), "5".to_string());

        let raw = article_query(&params);
        assert_eq!(raw.topic.as_deref(), Some("cats"));
        assert_eq!(raw.sort_by, None);
        assert_eq!(raw.order, None);
    }
}
