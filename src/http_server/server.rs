//! # HTTP Server
//!
//! Combines the HTML pages, JSON API and health check into one axum app.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::api_routes::api_routes;
use super::board_routes::{board_routes, not_found_handler, BoardState};
use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use crate::observability::{log_event_with_fields, Event, Severity};

/// HTTP server for the board
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: Arc<BoardState>) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;

        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Severity::Info, Event::Serving, &[("addr", &bound)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event_with_fields(Severity::Info, Event::Shutdown, &[("addr", &bound)]);
        Ok(())
    }
}

/// Build the combined router
pub fn build_router(config: &HttpServerConfig, state: Arc<BoardState>) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Unusable origins allow nothing rather than everything
        let origins = config.parsed_cors_origins().unwrap_or_else(|reason| {
            log_event_with_fields(Severity::Warn, Event::CorsOriginsInvalid, &[("reason", &reason)]);
            Vec::new()
        });

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(health_routes())
        .merge(board_routes(state.clone()))
        .nest("/api", api_routes(state).layer(cors))
        .fallback(not_found_handler)
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn state() -> Arc<BoardState> {
        Arc::new(BoardState::new(Board::in_memory(), 3))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), state());
        assert_eq!(server.socket_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_router_builds_with_cors_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, state()).router();
    }
}
