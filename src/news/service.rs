//! # News Data Access Operations
//!
//! One operation per entity/action. Each runs its steps strictly in
//! sequence: existence checks, then validation, then the read or write.

use std::sync::Arc;

use crate::store::{QueryExecutor, SqlValue, StoreError};

use super::errors::{NewsError, NewsResult};
use super::existence::{self, Entity};
use super::models::{from_row, from_rows, Article, Comment, Topic, User};
use super::payload::{Fields, NewArticle, NewComment, VoteDelta};
use super::query::RawArticleQuery;
use super::statements;

/// Data access operations over a query executor
#[derive(Clone)]
pub struct NewsService {
    store: Arc<dyn QueryExecutor>,
}

impl NewsService {
    pub fn new(store: Arc<dyn QueryExecutor>) -> Self {
        Self { store }
    }

    fn store(&self) -> &dyn QueryExecutor {
        self.store.as_ref()
    }

    pub async fn list_topics(&self) -> NewsResult<Vec<Topic>> {
        let result = self.store().execute(statements::SELECT_TOPICS, &[]).await?;
        Ok(from_rows(result.rows)?)
    }

    /// List articles with their comment counts, filtered and sorted.
    ///
    /// A valid topic with no articles yields an empty list.
    pub async fn list_articles(&self, raw: &RawArticleQuery) -> NewsResult<Vec<Article>> {
        let topics = match raw.topic {
            Some(_) => self.list_topics().await?,
            None => Vec::new(),
        };
        let query = raw.validate(&topics)?;

        let sql = statements::list_articles(&query);
        let params: Vec<SqlValue> = query.topic.iter().cloned().map(SqlValue::from).collect();

        let result = self.store().execute(&sql, &params).await?;
        Ok(from_rows(result.rows)?)
    }

    pub async fn get_article(&self, article_id: &str) -> NewsResult<Article> {
        let result = self
            .store()
            .execute(statements::SELECT_ARTICLE_BY_ID, &[SqlValue::from(article_id)])
            .await?;
        let row = existence::ensure_affected(Entity::Article, result)?;
        Ok(from_row(row)?)
    }

    /// Comments for an article, most recent first
    pub async fn list_comments(&self, article_id: &str) -> NewsResult<Vec<Comment>> {
        existence::article_exists(self.store(), article_id).await?;

        let result = self
            .store()
            .execute(
                statements::SELECT_COMMENTS_FOR_ARTICLE,
                &[SqlValue::from(article_id)],
            )
            .await?;
        Ok(from_rows(result.rows)?)
    }

    pub async fn insert_comment(&self, article_id: &str, fields: &Fields) -> NewsResult<Comment> {
        existence::article_exists(self.store(), article_id).await?;
        let comment = NewComment::from_fields(fields)?;
        existence::user_exists(self.store(), &comment.username).await?;

        let result = self
            .store()
            .execute(
                statements::INSERT_COMMENT,
                &[
                    SqlValue::from(comment.body),
                    SqlValue::from(article_id),
                    SqlValue::from(comment.username),
                ],
            )
            .await?;
        let row = existence::ensure_affected(Entity::Comment, result)?;
        let inserted: Comment = from_row(row)?;

        tracing::info!(
            comment_id = inserted.comment_id,
            article_id = inserted.article_id,
            "comment inserted"
        );
        Ok(inserted)
    }

    /// Insert an article, then read it back with its comment count
    pub async fn insert_article(&self, fields: &Fields) -> NewsResult<Article> {
        let article = NewArticle::from_fields(fields)?;
        existence::user_exists(self.store(), &article.author).await?;
        existence::topic_exists(self.store(), &article.topic).await?;

        let result = self
            .store()
            .execute(
                statements::INSERT_ARTICLE,
                &[
                    SqlValue::from(article.title),
                    SqlValue::from(article.topic),
                    SqlValue::from(article.author),
                    SqlValue::from(article.body),
                    SqlValue::from(article.article_img_url),
                ],
            )
            .await?;
        let row = existence::ensure_affected(Entity::Article, result)?;

        let article_id = row
            .get("article_id")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| NewsError::Store(missing_column("article_id")))?;

        tracing::info!(article_id, "article inserted");
        self.get_article(&article_id.to_string()).await
    }

    /// Apply `votes = votes + inc_votes` to an article
    pub async fn adjust_article_votes(&self, article_id: &str, fields: &Fields) -> NewsResult<Article> {
        existence::article_exists(self.store(), article_id).await?;
        let delta = VoteDelta::for_article(fields)?;

        let result = self
            .store()
            .execute(
                statements::UPDATE_ARTICLE_VOTES,
                &[delta.into_param(), SqlValue::from(article_id)],
            )
            .await?;
        let row = existence::ensure_affected(Entity::Article, result)?;
        Ok(from_row(row)?)
    }

    /// Apply `votes = votes + inc_votes` to a comment.
    ///
    /// There is no pre-check; a missing comment shows up as zero rows.
    pub async fn adjust_comment_votes(&self, comment_id: &str, fields: &Fields) -> NewsResult<Comment> {
        let delta = VoteDelta::for_comment(fields)?;

        let result = self
            .store()
            .execute(
                statements::UPDATE_COMMENT_VOTES,
                &[delta.into_param(), SqlValue::from(comment_id)],
            )
            .await?;
        let row = existence::ensure_affected(Entity::Comment, result)?;
        Ok(from_row(row)?)
    }

    /// Delete a comment, returning the removed row
    pub async fn delete_comment(&self, comment_id: &str) -> NewsResult<Comment> {
        let result = self
            .store()
            .execute(statements::DELETE_COMMENT, &[SqlValue::from(comment_id)])
            .await?;
        let row = existence::ensure_affected(Entity::Comment, result)?;
        let removed: Comment = from_row(row)?;

        tracing::info!(comment_id = removed.comment_id, "comment deleted");
        Ok(removed)
    }

    pub async fn list_users(&self) -> NewsResult<Vec<User>> {
        let result = self.store().execute(statements::SELECT_USERS, &[]).await?;
        Ok(from_rows(result.rows)?)
    }

    pub async fn get_user(&self, username: &str) -> NewsResult<User> {
        let row = existence::user_exists(self.store(), username).await?;
        Ok(from_row(row)?)
    }
}

fn missing_column(name: &str) -> StoreError {
    StoreError::Database(format!("column {} missing from result", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    fn service() -> (Arc<MemoryStore>, NewsService) {
        let store = Arc::new(MemoryStore::demo());
        (store.clone(), NewsService::new(store))
    }

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_comment_for_missing_article_checked_before_body() {
        let (_, news) = service();
        let err = news.insert_comment("999", &Fields::new()).await.unwrap_err();
        assert!(matches!(err, NewsError::NotFound(ref m) if m == "no article of this ID in database"));
    }

    #[tokio::test]
    async fn test_comment_from_unknown_user_inserts_nothing() {
        let (store, news) = service();
        let err = news
            .insert_comment("1", &fields(json!({ "username": "nobody", "body": "hello" })))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::NotFound(ref m) if m == "no user of this username in database"));
        assert_eq!(store.snapshot().unwrap().comments.len(), 18);
    }

    #[tokio::test]
    async fn test_article_with_unknown_topic_is_not_found() {
        let (store, news) = service();
        let err = news
            .insert_article(&fields(json!({
                "author": "butter_bridge",
                "title": "t",
                "body": "b",
                "topic": "dogs",
                "article_img_url": "https://example.com/a.jpg"
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::NotFound(ref m) if m == "no topic of this slug in database"));
        assert_eq!(store.snapshot().unwrap().articles.len(), 12);
    }

    #[tokio::test]
    async fn test_inserted_article_reads_back_with_zero_comments() {
        let (_, news) = service();
        let article = news
            .insert_article(&fields(json!({
                "author": "lurker",
                "title": "On paper",
                "body": "It is made of trees.",
                "topic": "paper",
                "article_img_url": "https://example.com/paper.jpg"
            })))
            .await
            .unwrap();
        assert_eq!(article.article_id, 13);
        assert_eq!(article.comment_count, Some(0));
        assert_eq!(article.votes, 0);
    }

    #[tokio::test]
    async fn test_vote_deltas_commute() {
        let (_, a) = service();
        let (_, b) = service();

        a.adjust_article_votes("1", &fields(json!({ "inc_votes": 5 }))).await.unwrap();
        let first = a.adjust_article_votes("1", &fields(json!({ "inc_votes": -3 }))).await.unwrap();

        b.adjust_article_votes("1", &fields(json!({ "inc_votes": -3 }))).await.unwrap();
        let second = b.adjust_article_votes("1", &fields(json!({ "inc_votes": 5 }))).await.unwrap();

        assert_eq!(first.votes, 102);
        assert_eq!(first.votes, second.votes);
    }

    #[tokio::test]
    async fn test_store_type_mismatch_passes_through() {
        let (_, news) = service();
        let err = news.get_article("banana").await.unwrap_err();
        assert!(matches!(err, NewsError::Store(ref e) if e.is_type_mismatch()));
    }

    #[tokio::test]
    async fn test_topic_listing_is_only_consulted_for_filters() {
        let (_, news) = service();
        let raw = RawArticleQuery {
            sort_by: Some("votes".to_string()),
            ..Default::default()
        };
        let articles = news.list_articles(&raw).await.unwrap();
        assert_eq!(articles.len(), 12);
        assert_eq!(articles[0].article_id, 1);
    }
}
