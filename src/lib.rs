//! Instrumented Mini HTTP Backend Library

// Core subsystems
pub mod config;
pub mod http;
pub mod store;

// Cross-cutting concerns
pub mod observability;

pub use config::AppConfig;
pub use http::ApiServer;
pub use observability::MetricsRegistry;
