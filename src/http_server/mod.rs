//! # HTTP Server Module
//!
//! Serves the news API over axum with CORS and request tracing.
//!
//! # Endpoints
//!
//! - `/api` - Endpoint descriptor
//! - `/api/topics`, `/api/articles`, `/api/comments`, `/api/users`

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
