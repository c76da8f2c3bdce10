//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers
//! - Wire up middleware (tracing, instrumentation, panic recovery, body limits)
//! - Bind the server to a listener and serve until shutdown
//!
//! # Design Decisions
//! - The instrumentation middleware sits outside the panic-recovery layer,
//!   so a panicking handler still reaches it as a real 500 response
//! - Layers run after routing, which also puts the built-in 404 fallback
//!   under instrumentation

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::BuildError;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::middleware::track_requests;
use crate::observability::MetricsRegistry;
use crate::store::ItemStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemStore>,
    pub metrics: Arc<MetricsRegistry>,
}

/// HTTP server for the API.
pub struct ApiServer {
    router: Router,
    metrics: Arc<MetricsRegistry>,
}

impl ApiServer {
    /// Create a new server with freshly constructed state.
    pub fn new(config: &AppConfig) -> Result<Self, BuildError> {
        let metrics = Arc::new(MetricsRegistry::new(&config.observability)?);
        let state = AppState {
            items: Arc::new(ItemStore::new()),
            metrics: Arc::clone(&metrics),
        };

        let router = Self::build_router(config, state);
        Ok(Self { router, metrics })
    }

    /// Build the axum router with all middleware layers.
    ///
    /// Outermost to innermost: trace spans, request instrumentation, panic
    /// recovery, body size limit.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let registry = Arc::clone(&state.metrics);
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route(
                "/items",
                get(handlers::list_items).post(handlers::add_item),
            )
            .route("/metrics", get(handlers::render_metrics))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(CatchPanicLayer::new())
            .layer(middleware::from_fn_with_state(registry, track_requests))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // Periodic exporter maintenance (recommended for its histogram
        // storage); lives for the rest of the process.
        let handle = self.metrics.handle();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(5));
            loop {
                ticker.tick().await;
                handle.run_upkeep();
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn oversized_content_length_is_rejected_before_handlers() {
        let server = ApiServer::new(&AppConfig::default()).unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, (3 * 1024 * 1024).to_string())
            .body(Body::empty())
            .unwrap();

        let response = server.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn body_limit_is_taken_from_config() {
        let mut config = AppConfig::default();
        config.limits.max_body_bytes = 64;
        let server = ApiServer::new(&config).unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, "65")
            .body(Body::empty())
            .unwrap();

        let response = server.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
