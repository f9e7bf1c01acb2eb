//! Existence checks for referenced entities.
//!
//! Each check runs before the dependent read or write and turns an empty
//! result into a not-found failure.

use crate::store::{QueryExecutor, QueryResult, Row, SqlValue};

use super::errors::{NewsError, NewsResult};
use super::statements;

/// Message for a username that looks like a number
pub const INVALID_USERNAME: &str = "invalid data type";

/// Entity kinds that can be checked for existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Article,
    Comment,
    Topic,
    User,
}

impl Entity {
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Entity::Article => "no article of this ID in database",
            Entity::Comment => "no comment of this ID in database",
            Entity::Topic => "no topic of this slug in database",
            Entity::User => "no user of this username in database",
        }
    }

    pub fn not_found(&self) -> NewsError {
        NewsError::not_found(self.not_found_message())
    }
}

/// Require at least one row, returning the first
pub fn ensure_affected(entity: Entity, result: QueryResult) -> NewsResult<Row> {
    if result.row_count == 0 {
        return Err(entity.not_found());
    }
    result.into_first().ok_or_else(|| entity.not_found())
}

/// Confirm an article with this id exists
pub async fn article_exists(store: &dyn QueryExecutor, article_id: &str) -> NewsResult<()> {
    let result = store
        .execute(statements::SELECT_ARTICLE_ID, &[SqlValue::from(article_id)])
        .await?;
    ensure_affected(Entity::Article, result).map(|_| ())
}

/// Confirm a user with this username exists, returning its row.
///
/// All-digit usernames are rejected before querying.
pub async fn user_exists(store: &dyn QueryExecutor, username: &str) -> NewsResult<Row> {
    if is_numeric(username) {
        return Err(NewsError::bad_request(INVALID_USERNAME));
    }

    let result = store
        .execute(statements::SELECT_USER_BY_USERNAME, &[SqlValue::from(username)])
        .await?;
    ensure_affected(Entity::User, result)
}

/// Confirm a topic with this slug exists
pub async fn topic_exists(store: &dyn QueryExecutor, slug: &str) -> NewsResult<()> {
    let result = store
        .execute(statements::SELECT_TOPIC_BY_SLUG, &[SqlValue::from(slug)])
        .await?;
    ensure_affected(Entity::Topic, result).map(|_| ())
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
