//! Shared helpers for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use newsdesk::news::NewsService;
use newsdesk::rest_api::{api_router, AppState, EmptyBodyPolicy};
use newsdesk::store::MemoryStore;

/// A router over a freshly seeded store, plus the store for inspection
pub fn app_with(policy: EmptyBodyPolicy) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::demo());
    let state = AppState::new(NewsService::new(store.clone()), policy);
    (store, api_router(state))
}

pub fn app() -> (Arc<MemoryStore>, Router) {
    app_with(EmptyBodyPolicy::default())
}

/// Send a request and return the status with the parsed body.
///
/// An empty body comes back as `Value::Null`.
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

pub async fn patch(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(router, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::DELETE, uri, None).await
}

pub fn msg(body: &Value) -> &str {
    body["msg"].as_str().unwrap_or_default()
}
