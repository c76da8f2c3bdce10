//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method and endpoint
//! - `http_request_duration_seconds` (histogram): latency distribution by endpoint
//!
//! # Design Decisions
//! - The recorder is owned by [`MetricsRegistry`] and shared through app
//!   state instead of being installed process-globally, so tests can run
//!   fully isolated registries side by side
//! - The endpoint label is always a route template, never a raw path, which
//!   keeps label cardinality bounded by the size of the routing table
//! - Histogram buckets come from configuration and default to typical web
//!   latencies

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};

use crate::config::ObservabilityConfig;

/// Counter of completed requests, labeled by method and endpoint.
pub const REQUESTS_TOTAL: &str = "http_requests_total";

/// Histogram of request durations in seconds, labeled by endpoint.
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Owning wrapper around a Prometheus recorder.
///
/// Samples live inside the recorder and are mutated only through
/// [`MetricsRegistry::record_request`]; rendering never resets them.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
}

impl MetricsRegistry {
    /// Build a registry with the duration histogram bucketed per config.
    ///
    /// Fails if the bucket list is empty; callers are expected to have run
    /// config validation, which also rejects unsorted bounds.
    pub fn new(config: &ObservabilityConfig) -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
                &config.duration_buckets,
            )?
            .build_recorder();

        let registry = Self { recorder };
        registry.describe();
        Ok(registry)
    }

    fn describe(&self) {
        metrics::with_local_recorder(&self.recorder, || {
            describe_counter!(
                REQUESTS_TOTAL,
                Unit::Count,
                "Total HTTP requests by method and endpoint"
            );
            describe_histogram!(
                REQUEST_DURATION_SECONDS,
                Unit::Seconds,
                "HTTP request latency by endpoint"
            );
        });
    }

    /// Record one completed request: exactly one counter increment for
    /// (method, endpoint) and one duration observation for (endpoint).
    pub fn record_request(&self, method: &str, endpoint: &str, elapsed: Duration) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(REQUESTS_TOTAL, "method" => method.to_string(), "endpoint" => endpoint.to_string())
                .increment(1);
            histogram!(REQUEST_DURATION_SECONDS, "endpoint" => endpoint.to_string())
                .record(elapsed.as_secs_f64());
        });
    }

    /// Handle for rendering and exporter upkeep.
    pub fn handle(&self) -> PrometheusHandle {
        self.recorder.handle()
    }

    /// Render every accumulated sample in Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.recorder.handle().render()
    }
}
