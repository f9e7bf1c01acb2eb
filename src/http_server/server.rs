//! # HTTP Server
//!
//! Wraps the API router in CORS and request tracing and serves it.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::observability::Event;
use crate::rest_api::{api_router, AppState};

use super::config::HttpServerConfig;

/// HTTP server for the news API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        let cors = if config.allows_any_origin() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        api_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process ends
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        tracing::info!(event = %Event::ServerStart, addr = %addr, "starting http server");

        let listener = TcpListener::bind(&addr).await?;
        let local = listener.local_addr()?;
        tracing::info!(
            event = %Event::ServerListening,
            addr = %local,
            "api available at http://{}/api",
            local
        );

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
