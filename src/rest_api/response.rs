//! # Response Formatting
//!
//! Named envelopes wrapping each successful result.

use serde::Serialize;

use crate::news::{Article, Comment, Topic, User};

#[derive(Debug, Clone, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    #[serde(rename = "requestedArticle")]
    pub requested_article: Article,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticlePostedResponse {
    #[serde(rename = "articlePosted")]
    pub article_posted: Article,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedArticleResponse {
    #[serde(rename = "updatedArticle")]
    pub updated_article: Article,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentPostedResponse {
    #[serde(rename = "commentPosted")]
    pub comment_posted: Comment,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedCommentResponse {
    #[serde(rename = "updatedComment")]
    pub updated_comment: Comment,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn comment() -> Comment {
        Comment {
            comment_id: 19,
            body: "hello".to_string(),
            article_id: 1,
            author: "lurker".to_string(),
            votes: 0,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_envelope_names() {
        let posted = serde_json::to_value(CommentPostedResponse {
            comment_posted: comment(),
        })
        .unwrap();
        assert_eq!(posted["commentPosted"]["comment_id"], 19);

        let updated = serde_json::to_value(UpdatedCommentResponse {
            updated_comment: comment(),
        })
        .unwrap();
        assert!(updated.get("updatedComment").is_some());
    }

    #[test]
    fn test_list_envelope() {
        let body = serde_json::to_value(CommentsResponse {
            comments: vec![comment(), comment()],
        })
        .unwrap();
        assert_eq!(body["comments"].as_array().unwrap().len(), 2);
    }
}
