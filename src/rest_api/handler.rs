//! # Request Handlers
//!
//! Each handler adapts path, query and body into a news operation and wraps
//! the result in its envelope. Failures go to the error dispatcher.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::news::NewsService;

use super::endpoints;
use super::errors::{RestError, RestResult};
use super::parser::{self, EmptyBodyPolicy, PathParam, Payload};
use super::response::{
    ArticlePostedResponse, ArticleResponse, ArticlesResponse, CommentPostedResponse,
    CommentsResponse, TopicsResponse, UpdatedArticleResponse, UpdatedCommentResponse,
    UserResponse, UsersResponse,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub news: NewsService,
    pub empty_body: EmptyBodyPolicy,
}

impl AppState {
    pub fn new(news: NewsService, empty_body: EmptyBodyPolicy) -> Self {
        Self { news, empty_body }
    }
}

pub async fn get_endpoints() -> Json<Value> {
    Json(endpoints::descriptor())
}

pub async fn get_topics(State(state): State<AppState>) -> RestResult<Json<TopicsResponse>> {
    let topics = state.news.list_topics().await?;
    Ok(Json(TopicsResponse { topics }))
}

pub async fn get_articles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Json<ArticlesResponse>> {
    let raw = parser::article_query(&params);
    let articles = state.news.list_articles(&raw).await?;
    Ok(Json(ArticlesResponse { articles }))
}

pub async fn get_article(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
) -> RestResult<Json<ArticleResponse>> {
    let requested_article = state.news.get_article(&article_id).await?;
    Ok(Json(ArticleResponse { requested_article }))
}

pub async fn post_article(State(state): State<AppState>, body: Bytes) -> RestResult<Response> {
    let Some(fields) = Payload::parse(&body)?.for_insert(state.empty_body)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let article_posted = state.news.insert_article(&fields).await?;
    Ok((StatusCode::CREATED, Json(ArticlePostedResponse { article_posted })).into_response())
}

pub async fn patch_article(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
    body: Bytes,
) -> RestResult<Json<UpdatedArticleResponse>> {
    let fields = Payload::parse(&body)?.into_fields();
    let updated_article = state.news.adjust_article_votes(&article_id, &fields).await?;
    Ok(Json(UpdatedArticleResponse { updated_article }))
}

pub async fn get_comments(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
) -> RestResult<Json<CommentsResponse>> {
    let comments = state.news.list_comments(&article_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

pub async fn post_comment(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
    body: Bytes,
) -> RestResult<Response> {
    let Some(fields) = Payload::parse(&body)?.for_insert(state.empty_body)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let comment_posted = state.news.insert_comment(&article_id, &fields).await?;
    Ok((StatusCode::CREATED, Json(CommentPostedResponse { comment_posted })).into_response())
}

pub async fn patch_comment(
    State(state): State<AppState>,
    PathParam(comment_id): PathParam,
    body: Bytes,
) -> RestResult<Json<UpdatedCommentResponse>> {
    let fields = Payload::parse(&body)?.into_fields();
    let updated_comment = state.news.adjust_comment_votes(&comment_id, &fields).await?;
    Ok(Json(UpdatedCommentResponse { updated_comment }))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    PathParam(comment_id): PathParam,
) -> RestResult<StatusCode> {
    state.news.delete_comment(&comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_users(State(state): State<AppState>) -> RestResult<Json<UsersResponse>> {
    let users = state.news.list_users().await?;
    Ok(Json(UsersResponse { users }))
}

pub async fn get_user(
    State(state): State<AppState>,
    PathParam(username): PathParam,
) -> RestResult<Json<UserResponse>> {
    let user = state.news.get_user(&username).await?;
    Ok(Json(UserResponse { user }))
}

/// Catch-all for paths no route matches
pub async fn route_not_found() -> RestError {
    RestError::RouteNotFound
}
