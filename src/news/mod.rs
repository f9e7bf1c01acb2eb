//! # News Module
//!
//! Topics, articles, comments and users: validation of listing parameters,
//! existence checks on referenced entities, and the data access operations
//! that compose parameterized statements for the store.

pub mod errors;
pub mod existence;
pub mod models;
pub mod payload;
pub mod query;
pub mod service;
pub mod statements;

pub use errors::{NewsError, NewsResult};
pub use existence::Entity;
pub use models::{Article, Comment, Topic, User};
pub use payload::Fields;
pub use query::{ArticleQuery, RawArticleQuery, SortColumn, SortDirection};
pub use service::NewsService;
