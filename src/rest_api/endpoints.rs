//! The `/api` discovery document.

use serde_json::{json, Value};

/// Describe every route the API serves
pub fn descriptor() -> Value {
    json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!" }]
            }
        },
        "GET /api/articles": {
            "description": "serves an array of all articles with their comment counts",
            "queries": ["topic", "sort_by", "order"],
            "exampleResponse": {
                "articles": [{
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "body": "Text from the article..",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 0,
                    "article_img_url": "https://example.com/seafood.jpg",
                    "comment_count": 6
                }]
            }
        },
        "POST /api/articles": {
            "description": "adds an article and serves it back with a comment count",
            "body": ["author", "title", "body", "topic", "article_img_url"],
            "exampleResponse": { "articlePosted": { "article_id": 13, "comment_count": 0 } }
        },
        "GET /api/articles/:article_id": {
            "description": "serves a single article with its comment count",
            "exampleResponse": { "requestedArticle": { "article_id": 1, "comment_count": 11 } }
        },
        "PATCH /api/articles/:article_id": {
            "description": "adds inc_votes to the article's votes and serves the updated article",
            "body": ["inc_votes"],
            "exampleResponse": { "updatedArticle": { "article_id": 1, "votes": 80 } }
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves the comments for an article, most recent first",
            "exampleResponse": { "comments": [{ "comment_id": 5, "article_id": 1 }] }
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to an article and serves it back",
            "body": ["username", "body"],
            "exampleResponse": { "commentPosted": { "comment_id": 19, "article_id": 1 } }
        },
        "PATCH /api/comments/:comment_id": {
            "description": "adds inc_votes to the comment's votes and serves the updated comment",
            "body": ["inc_votes"],
            "exampleResponse": { "updatedComment": { "comment_id": 1, "votes": 17 } }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes a comment, responding with no content"
        },
        "GET /api/users": {
            "description": "serves an array of all users",
            "exampleResponse": {
                "users": [{ "username": "lurker", "name": "do_nothing", "avatar_url": "https://example.com/u.png" }]
            }
        },
        "GET /api/users/:username": {
            "description": "serves a single user",
            "exampleResponse": {
                "user": { "username": "lurker", "name": "do_nothing", "avatar_url": "https://example.com/u.png" }
            }
        }
    })
}

/// Route keys of the document, sorted
pub fn routes() -> Vec<String> {
    match descriptor() {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
