//! SQL text for every statement the news operations issue.
//!
//! Values always travel as positional parameters. The only dynamic piece is
//! the ordering clause of the article listing, and that is assembled from
//! whitelisted enum values.

use super::query::{ArticleQuery, SortColumn, SortDirection};

/// Article columns plus the live comment count, joined and ready for a
/// `WHERE` / `GROUP BY` suffix.
macro_rules! article_select {
    () => {
        "SELECT articles.article_id, articles.title, articles.topic, articles.author, \
         articles.body, articles.created_at, articles.votes, articles.article_img_url, \
         COUNT(comments.comment_id)::INT AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id"
    };
}

pub const ARTICLE_SELECT: &str = article_select!();

pub const TOPIC_FILTER: &str = " WHERE articles.topic = $1";

pub const ARTICLE_GROUPING: &str = " GROUP BY articles.article_id ORDER BY ";

pub const SELECT_ARTICLE_BY_ID: &str = concat!(
    article_select!(),
    " WHERE articles.article_id = $1 GROUP BY articles.article_id"
);

pub const SELECT_TOPICS: &str = "SELECT slug, description FROM topics";

pub const SELECT_TOPIC_BY_SLUG: &str = "SELECT slug, description FROM topics WHERE slug = $1";

pub const SELECT_ARTICLE_ID: &str = "SELECT article_id FROM articles WHERE article_id = $1";

pub const SELECT_USERS: &str = "SELECT username, name, avatar_url FROM users";

pub const SELECT_USER_BY_USERNAME: &str =
    "SELECT username, name, avatar_url FROM users WHERE username = $1";

pub const SELECT_COMMENTS_FOR_ARTICLE: &str =
    "SELECT comment_id, body, article_id, author, votes, created_at \
     FROM comments WHERE article_id = $1 ORDER BY created_at DESC";

pub const INSERT_COMMENT: &str = "INSERT INTO comments (body, article_id, author) \
     VALUES ($1, $2, $3) \
     RETURNING comment_id, body, article_id, author, votes, created_at";

pub const INSERT_ARTICLE: &str =
    "INSERT INTO articles (title, topic, author, body, article_img_url) \
     VALUES ($1, $2, $3, $4, $5) RETURNING article_id";

pub const UPDATE_ARTICLE_VOTES: &str = "UPDATE articles SET votes = votes + $1 \
     WHERE article_id = $2 \
     RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url";

pub const UPDATE_COMMENT_VOTES: &str = "UPDATE comments SET votes = votes + $1 \
     WHERE comment_id = $2 \
     RETURNING comment_id, body, article_id, author, votes, created_at";

pub const DELETE_COMMENT: &str = "DELETE FROM comments WHERE comment_id = $1 \
     RETURNING comment_id, body, article_id, author, votes, created_at";

/// Build the article listing statement for a validated query.
///
/// When a topic filter is present it is bound as `$1`.
pub fn list_articles(query: &ArticleQuery) -> String {
    let filter = if query.topic.is_some() { TOPIC_FILTER } else { "" };
    format!(
        "{}{}{}{}",
        ARTICLE_SELECT,
        filter,
        ARTICLE_GROUPING,
        ordering(query.sort_by, query.order)
    )
}

/// `<expression> <ASC|DESC>` for the ordering clause
pub fn ordering(column: SortColumn, direction: SortDirection) -> String {
    format!("{} {}", column.order_expr(), direction.as_sql())
}
