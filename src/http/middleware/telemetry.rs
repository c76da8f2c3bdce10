//! Request instrumentation middleware.
//!
//! # Responsibilities
//! - Time every inbound request against a monotonic clock
//! - Increment the request counter and observe the latency histogram
//! - Emit one structured log line per completed request
//!
//! # Design Decisions
//! - All emission lives in the `Drop` impl of a scope guard created at
//!   request entry, so each request is recorded exactly once whether the
//!   handler returns normally, panics, or its future is dropped mid-flight
//! - The endpoint label is the matched route template (`/items`, not the
//!   raw path); requests that hit no route share the fixed label
//!   `unmatched`, keeping label cardinality bounded by the routing table
//!
//! # Data Flow
//! ```text
//! request -> guard created -> next.run().await -> status stored
//!                                   |
//!                    guard dropped (any exit path)
//!                                   |
//!          counter + histogram + log line, once
//! ```

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::observability::MetricsRegistry;

/// Endpoint label shared by every request that matched no route.
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Scope guard owning the telemetry of one in-flight request.
struct RequestTelemetry {
    registry: Arc<MetricsRegistry>,
    method: String,
    endpoint: String,
    started: Instant,
    status: Option<StatusCode>,
}

impl Drop for RequestTelemetry {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        // No status means the request future was dropped before completion
        // (client disconnect); record it as a server-side failure.
        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        self.registry
            .record_request(&self.method, &self.endpoint, elapsed);
        tracing::info!(
            method = %self.method,
            endpoint = %self.endpoint,
            status = status.as_u16(),
            duration_secs = %format_args!("{:.4}", elapsed.as_secs_f64()),
            "Request completed"
        );
    }
}

/// Middleware wrapping the whole router, the 404 fallback included.
pub async fn track_requests(
    State(registry): State<Arc<MetricsRegistry>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut telemetry = RequestTelemetry {
        registry,
        method: request.method().to_string(),
        endpoint: endpoint_label(&request),
        started: Instant::now(),
        status: None,
    };

    let response = next.run(request).await;
    telemetry.status = Some(response.status());
    response
}

/// The matched route template, or the shared unmatched label.
fn endpoint_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_owned())
}
