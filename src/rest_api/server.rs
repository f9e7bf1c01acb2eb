//! # REST API Router
//!
//! Assembles the `/api` routes over shared handler state.

use axum::routing::{get, patch, MethodRouter};
use axum::Router;

use super::handler::{self, AppState};

/// Answer unsupported methods on a known path like an unknown path
fn or_not_found(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handler::route_not_found)
}

/// Build the API router. Unmatched paths and methods answer 404 with a
/// `msg` body.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api", or_not_found(get(handler::get_endpoints)))
        .route("/api/topics", or_not_found(get(handler::get_topics)))
        .route(
            "/api/articles",
            or_not_found(get(handler::get_articles).post(handler::post_article)),
        )
        .route(
            "/api/articles/:article_id",
            or_not_found(get(handler::get_article).patch(handler::patch_article)),
        )
        .route(
            "/api/articles/:article_id/comments",
            or_not_found(get(handler::get_comments).post(handler::post_comment)),
        )
        .route(
            "/api/comments/:comment_id",
            or_not_found(patch(handler::patch_comment).delete(handler::delete_comment)),
        )
        .route("/api/users", or_not_found(get(handler::get_users)))
        .route("/api/users/:username", or_not_found(get(handler::get_user)))
        .fallback(handler::route_not_found)
        .with_state(state)
}
