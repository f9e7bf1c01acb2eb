//! # Article Query Validation
//!
//! Whitelists and normalizes the optional `topic`, `sort_by` and `order`
//! parameters of the article listing.

use super::errors::NewsError;
use super::models::Topic;

/// Message returned for any rejected listing parameter
pub const BAD_REQUEST: &str = "Bad request";

/// Sortable article columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    ArticleId,
    Title,
    Topic,
    Author,
    Body,
    #[default]
    CreatedAt,
    Votes,
    ArticleImgUrl,
    CommentCount,
}

impl SortColumn {
    /// The whitelist: every accepted `sort_by` value
    pub const ALL: [SortColumn; 9] = [
        SortColumn::ArticleId,
        SortColumn::Title,
        SortColumn::Topic,
        SortColumn::Author,
        SortColumn::Body,
        SortColumn::CreatedAt,
        SortColumn::Votes,
        SortColumn::ArticleImgUrl,
        SortColumn::CommentCount,
    ];

    /// The name clients use in `sort_by`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::ArticleId => "article_id",
            SortColumn::Title => "title",
            SortColumn::Topic => "topic",
            SortColumn::Author => "author",
            SortColumn::Body => "body",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
            SortColumn::ArticleImgUrl => "article_img_url",
            SortColumn::CommentCount => "comment_count",
        }
    }

    /// The expression placed in the ORDER BY clause.
    ///
    /// `comment_count` is the aggregate alias, everything else a raw column.
    pub fn order_expr(&self) -> &'static str {
        match self {
            SortColumn::ArticleId => "articles.article_id",
            SortColumn::Title => "articles.title",
            SortColumn::Topic => "articles.topic",
            SortColumn::Author => "articles.author",
            SortColumn::Body => "articles.body",
            SortColumn::CreatedAt => "articles.created_at",
            SortColumn::Votes => "articles.votes",
            SortColumn::ArticleImgUrl => "articles.article_img_url",
            SortColumn::CommentCount => "comment_count",
        }
    }

    /// Case-insensitive lookup in the whitelist
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
    }

    /// Reverse of [`SortColumn::order_expr`]
    pub fn from_order_expr(expr: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.order_expr() == expr)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const ALL: [SortDirection; 2] = [SortDirection::Asc, SortDirection::Desc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(value))
    }
}

/// Listing parameters as they arrive from the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticleQuery {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// A validated listing descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Canonical slug of the topic to filter on
    pub topic: Option<String>,
    pub sort_by: SortColumn,
    pub order: SortDirection,
}

/// Why a listing parameter was rejected. Clients only ever see
/// [`BAD_REQUEST`]; the distinction is kept for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    InvalidFilter(String),
    InvalidSort(String),
}

impl From<ValidationFailure> for NewsError {
    fn from(failure: ValidationFailure) -> Self {
        tracing::debug!(?failure, "article query rejected");
        NewsError::bad_request(BAD_REQUEST)
    }
}

impl RawArticleQuery {
    /// Validate against the whitelist and the live topic set
    pub fn validate(&self, topics: &[Topic]) -> Result<ArticleQuery, ValidationFailure> {
        let topic = match &self.topic {
            None => None,
            Some(wanted) => {
                let found = topics
                    .iter()
                    .find(|t| t.slug.eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ValidationFailure::InvalidFilter(wanted.clone()))?;
                Some(found.slug.clone())
            }
        };

        let sort_by = match &self.sort_by {
            None => SortColumn::default(),
            Some(value) => SortColumn::parse(value)
                .ok_or_else(|| ValidationFailure::InvalidSort(value.clone()))?,
        };

        let order = match &self.order {
            None => SortDirection::default(),
            Some(value) => SortDirection::parse(value)
                .ok_or_else(|| ValidationFailure::InvalidSort(value.clone()))?,
        };

        Ok(ArticleQuery {
            topic,
            sort_by,
            order,
        })
    }
}
