//! Observability: metrics registry and logging setup.
//!
//! # Responsibilities
//! - Own the Prometheus recorder and expose a narrow recording API
//! - Initialize the tracing subscriber from configuration
//!
//! # Data Flow
//! ```text
//! middleware -> MetricsRegistry::record_request -> recorder samples
//! GET /metrics -> MetricsRegistry::render -> text exposition
//! ```
//!
//! Request spans themselves come from `TraceLayer` in the router stack, not
//! from this module.

pub mod logging;
pub mod metrics;

pub use metrics::MetricsRegistry;
