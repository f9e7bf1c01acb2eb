//! # In-Memory Executor
//!
//! A [`QueryExecutor`] that understands exactly the statements issued by the
//! news operations and evaluates them over an in-process [`Dataset`].
//!
//! Integer parameters follow the PostgreSQL rules the real executor
//! enforces: text that is not an integer, or that overflows a 4-byte
//! integer, is a type mismatch.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::news::models::{Article, Comment, Topic, User};
use crate::news::query::{SortColumn, SortDirection};
use crate::news::statements;

use super::errors::{StoreError, StoreResult};
use super::{QueryExecutor, QueryResult, Row, SqlValue};

/// Table contents
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<Article>,
    pub comments: Vec<Comment>,
}

impl Dataset {
    /// The bundled demo data
    pub fn demo() -> Self {
        super::seed::demo_dataset()
    }
}

/// In-memory executor for tests and local demos
pub struct MemoryStore {
    data: Mutex<Dataset>,
}

impl MemoryStore {
    pub fn new(data: Dataset) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    /// A store seeded with [`Dataset::demo`]
    pub fn demo() -> Self {
        Self::new(Dataset::demo())
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> StoreResult<Dataset> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Dataset>> {
        self.data
            .lock()
            .map_err(|_| StoreError::Database("Lock poisoned".to_string()))
    }

    fn run(&self, sql: &str, params: &[SqlValue]) -> StoreResult<QueryResult> {
        let mut data = self.lock()?;

        let rows = match sql {
            statements::SELECT_TOPICS => to_rows(&data.topics)?,
            statements::SELECT_TOPIC_BY_SLUG => {
                let slug = text_param(params, 0)?;
                to_rows(data.topics.iter().filter(|t| Some(&t.slug) == slug.as_ref()))?
            }
            statements::SELECT_USERS => to_rows(&data.users)?,
            statements::SELECT_USER_BY_USERNAME => {
                let username = text_param(params, 0)?;
                to_rows(data.users.iter().filter(|u| Some(&u.username) == username.as_ref()))?
            }
            statements::SELECT_ARTICLE_ID => {
                let id = int_param(params, 0)?;
                data.articles
                    .iter()
                    .filter(|a| Some(a.article_id) == id)
                    .map(|a| row_of(&[("article_id", Value::from(a.article_id))]))
                    .collect()
            }
            statements::SELECT_ARTICLE_BY_ID => {
                let id = int_param(params, 0)?;
                let found: Vec<Article> = data
                    .articles
                    .iter()
                    .filter(|a| Some(a.article_id) == id)
                    .map(|a| with_comment_count(a, &data.comments))
                    .collect();
                to_rows(&found)?
            }
            statements::SELECT_COMMENTS_FOR_ARTICLE => {
                let id = int_param(params, 0)?;
                let mut found: Vec<&Comment> = data
                    .comments
                    .iter()
                    .filter(|c| Some(c.article_id) == id)
                    .collect();
                found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                to_rows(found)?
            }
            statements::INSERT_COMMENT => {
                let body = required(text_param(params, 0)?, "body")?;
                let article_id = required(int_param(params, 1)?, "article_id")?;
                let author = required(text_param(params, 2)?, "author")?;

                if !data.articles.iter().any(|a| a.article_id == article_id) {
                    return Err(foreign_key("comments", "article_id"));
                }
                if !data.users.iter().any(|u| u.username == author) {
                    return Err(foreign_key("comments", "author"));
                }

                let comment = Comment {
                    comment_id: next_id(data.comments.iter().map(|c| c.comment_id)),
                    body,
                    article_id,
                    author,
                    votes: 0,
                    created_at: Utc::now(),
                };
                let rows = to_rows([&comment])?;
                data.comments.push(comment);
                rows
            }
            statements::INSERT_ARTICLE => {
                let title = required(text_param(params, 0)?, "title")?;
                let topic = required(text_param(params, 1)?, "topic")?;
                let author = required(text_param(params, 2)?, "author")?;
                let body = required(text_param(params, 3)?, "body")?;
                let article_img_url = required(text_param(params, 4)?, "article_img_url")?;

                if !data.topics.iter().any(|t| t.slug == topic) {
                    return Err(foreign_key("articles", "topic"));
                }
                if !data.users.iter().any(|u| u.username == author) {
                    return Err(foreign_key("articles", "author"));
                }

                let article_id = next_id(data.articles.iter().map(|a| a.article_id));
                data.articles.push(Article {
                    article_id,
                    title,
                    topic,
                    author,
                    body,
                    created_at: Utc::now(),
                    votes: 0,
                    article_img_url,
                    comment_count: None,
                });
                vec![row_of(&[("article_id", Value::from(article_id))])]
            }
            statements::UPDATE_ARTICLE_VOTES => {
                let delta = required(int_param(params, 0)?, "votes")?;
                let id = int_param(params, 1)?;
                let mut updated = Vec::new();
                for article in data.articles.iter_mut().filter(|a| Some(a.article_id) == id) {
                    article.votes = add_votes(article.votes, delta)?;
                    updated.push(article.clone());
                }
                to_rows(&updated)?
            }
            statements::UPDATE_COMMENT_VOTES => {
                let delta = required(int_param(params, 0)?, "votes")?;
                let id = int_param(params, 1)?;
                let mut updated = Vec::new();
                for comment in data.comments.iter_mut().filter(|c| Some(c.comment_id) == id) {
                    comment.votes = add_votes(comment.votes, delta)?;
                    updated.push(comment.clone());
                }
                to_rows(&updated)?
            }
            statements::DELETE_COMMENT => {
                let id = int_param(params, 0)?;
                let (removed, kept): (Vec<Comment>, Vec<Comment>) = data
                    .comments
                    .drain(..)
                    .partition(|c| Some(c.comment_id) == id);
                data.comments = kept;
                to_rows(&removed)?
            }
            other => list_articles(&data, other, params)?,
        };

        Ok(QueryResult::new(rows))
    }
}

#[async_trait]
impl QueryExecutor for MemoryStore {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> StoreResult<QueryResult> {
        tracing::trace!(sql, params = params.len(), "memory query");
        self.run(sql, params)
    }
}

/// Evaluate a statement produced by `statements::list_articles`
fn list_articles(data: &Dataset, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>> {
    let unknown = || StoreError::UnknownStatement(sql.to_string());

    let rest = sql.strip_prefix(statements::ARTICLE_SELECT).ok_or_else(unknown)?;
    let (topic, rest) = match rest.strip_prefix(statements::TOPIC_FILTER) {
        Some(rest) => (Some(required(text_param(params, 0)?, "topic")?), rest),
        None => (None, rest),
    };
    let ordering = rest.strip_prefix(statements::ARTICLE_GROUPING).ok_or_else(unknown)?;

    let (expr, direction) = ordering.rsplit_once(' ').ok_or_else(unknown)?;
    let column = SortColumn::from_order_expr(expr).ok_or_else(unknown)?;
    let direction = match direction {
        "ASC" => SortDirection::Asc,
        "DESC" => SortDirection::Desc,
        _ => return Err(unknown()),
    };

    let mut articles: Vec<Article> = data
        .articles
        .iter()
        .filter(|a| topic.as_ref().map_or(true, |t| &a.topic == t))
        .map(|a| with_comment_count(a, &data.comments))
        .collect();

    articles.sort_by(|a, b| {
        let ord = compare_by(column, a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    to_rows(&articles)
}

fn compare_by(column: SortColumn, a: &Article, b: &Article) -> Ordering {
    match column {
        SortColumn::ArticleId => a.article_id.cmp(&b.article_id),
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Topic => a.topic.cmp(&b.topic),
        SortColumn::Author => a.author.cmp(&b.author),
        SortColumn::Body => a.body.cmp(&b.body),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Votes => a.votes.cmp(&b.votes),
        SortColumn::ArticleImgUrl => a.article_img_url.cmp(&b.article_img_url),
        SortColumn::CommentCount => a.comment_count.cmp(&b.comment_count),
    }
}

fn with_comment_count(article: &Article, comments: &[Comment]) -> Article {
    let count = comments
        .iter()
        .filter(|c| c.article_id == article.article_id)
        .count() as i64;
    Article {
        comment_count: Some(count),
        ..article.clone()
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn to_rows<T: Serialize>(items: impl IntoIterator<Item = T>) -> StoreResult<Vec<Row>> {
    items
        .into_iter()
        .map(|item| match serde_json::to_value(item) {
            Ok(Value::Object(row)) => Ok(row),
            Ok(other) => Err(StoreError::Database(format!("not a row: {}", other))),
            Err(e) => Err(StoreError::Database(e.to_string())),
        })
        .collect()
}

fn row_of(columns: &[(&str, Value)]) -> Row {
    columns
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn param(params: &[SqlValue], index: usize) -> StoreResult<&SqlValue> {
    params.get(index).ok_or_else(|| {
        StoreError::Database(format!("missing parameter ${}", index + 1))
    })
}

/// Integer parameter, limited to the 4-byte range of the id and vote columns
fn int_param(params: &[SqlValue], index: usize) -> StoreResult<Option<i64>> {
    let position = index + 1;
    match param(params, index)?.to_integer(position)? {
        Some(n) if i32::try_from(n).is_err() => Err(StoreError::TypeMismatch(format!(
            "parameter ${} out of range: {}",
            position, n
        ))),
        other => Ok(other),
    }
}

/// `votes + delta` for a 4-byte `votes` column
fn add_votes(votes: i64, delta: i64) -> StoreResult<i64> {
    votes
        .checked_add(delta)
        .filter(|sum| i32::try_from(*sum).is_ok())
        .ok_or_else(|| {
            StoreError::TypeMismatch(format!("integer out of range: {} + {}", votes, delta))
        })
}

fn text_param(params: &[SqlValue], index: usize) -> StoreResult<Option<String>> {
    Ok(param(params, index)?.to_text())
}

fn required<T>(value: Option<T>, column: &str) -> StoreResult<T> {
    value.ok_or_else(|| {
        StoreError::Database(format!("null value in column \"{}\" violates not-null constraint", column))
    })
}

fn foreign_key(table: &str, column: &str) -> StoreError {
    StoreError::Database(format!(
        "insert on table \"{}\" violates foreign key constraint on \"{}\"",
        table, column
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::query::ArticleQuery;

    #[tokio::test]
    async fn test_unknown_statement() {
        let store = MemoryStore::demo();
        let err = store.execute("DROP TABLE articles", &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownStatement(_)));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_type_mismatch() {
        let store = MemoryStore::demo();
        let err = store
            .execute(statements::SELECT_ARTICLE_ID, &[SqlValue::from("banana")])
            .await
            .unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[tokio::test]
    async fn test_oversized_id_is_type_mismatch() {
        let store = MemoryStore::demo();
        let err = store
            .execute(statements::SELECT_ARTICLE_ID, &[SqlValue::from("99999999999")])
            .await
            .unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[tokio::test]
    async fn test_aggregated_article_carries_comment_count() {
        let store = MemoryStore::demo();
        let result = store
            .execute(statements::SELECT_ARTICLE_BY_ID, &[SqlValue::from("1")])
            .await
            .unwrap();
        assert_eq!(result.row_count, 1);
        assert_eq!(result.rows[0]["comment_count"], 11);
    }

    #[tokio::test]
    async fn test_listing_statement_round_trip() {
        let store = MemoryStore::demo();
        let query = ArticleQuery {
            topic: Some("cats".to_string()),
            sort_by: SortColumn::CommentCount,
            order: SortDirection::Asc,
        };
        let result = store
            .execute(&statements::list_articles(&query), &[SqlValue::from("cats")])
            .await
            .unwrap();
        assert_eq!(result.row_count, 1);
        assert_eq!(result.rows[0]["topic"], "cats");
    }

    #[tokio::test]
    async fn test_insert_comment_checks_foreign_keys() {
        let store = MemoryStore::demo();
        let err = store
            .execute(
                statements::INSERT_COMMENT,
                &[SqlValue::from("hi"), SqlValue::Int(1), SqlValue::from("nobody")],
            )
            .await
            .unwrap_err();
        assert!(!err.is_type_mismatch());
        assert_eq!(store.snapshot().unwrap().comments.len(), 18);
    }

    #[tokio::test]
    async fn test_vote_overflow_is_type_mismatch_and_leaves_row() {
        let store = MemoryStore::demo();
        let err = store
            .execute(
                statements::UPDATE_ARTICLE_VOTES,
                &[SqlValue::Int(i64::from(i32::MAX)), SqlValue::Int(1)],
            )
            .await
            .unwrap_err();
        assert!(err.is_type_mismatch());

        let article = store
            .snapshot()
            .unwrap()
            .articles
            .into_iter()
            .find(|a| a.article_id == 1)
            .unwrap();
        assert_eq!(article.votes, 100);
    }

    #[test]
    fn test_add_votes_bounds() {
        assert_eq!(add_votes(100, -20).unwrap(), 80);
        assert_eq!(add_votes(0, i64::from(i32::MIN)).unwrap(), i64::from(i32::MIN));
        assert!(add_votes(-1, i64::from(i32::MIN)).unwrap_err().is_type_mismatch());
    }

    #[tokio::test]
    async fn test_delete_reports_removed_rows() {
        let store = MemoryStore::demo();
        let result = store
            .execute(statements::DELETE_COMMENT, &[SqlValue::Int(1)])
            .await
            .unwrap();
        assert_eq!(result.row_count, 1);

        let again = store
            .execute(statements::DELETE_COMMENT, &[SqlValue::Int(1)])
            .await
            .unwrap();
        assert_eq!(again.row_count, 0);
    }
}
