//! Row-shaped domain entities.
//!
//! Field names follow the store's column names, which are also the names
//! the HTTP layer serializes.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Row, StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// An article. `comment_count` is only present on aggregated reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub article_img_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub body: String,
    pub article_id: i64,
    pub author: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

/// Decode a store row into an entity
pub fn from_row<T: DeserializeOwned>(row: Row) -> StoreResult<T> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| StoreError::Database(format!("row decode failed: {}", e)))
}

/// Decode every row of a result
pub fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> StoreResult<Vec<T>> {
    rows.into_iter().map(from_row).collect()
}
