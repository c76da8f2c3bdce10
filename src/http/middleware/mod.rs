//! Middleware applied across the HTTP surface.

pub mod telemetry;

pub use telemetry::{track_requests, UNMATCHED_ENDPOINT};
