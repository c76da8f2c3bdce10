//! Configuration validation.
//!
//! Serde handles the syntactic layer; this module covers the semantic checks:
//! the bind address must parse, the log filter must be a valid directive, and
//! the histogram buckets must describe a usable distribution. Validation is a
//! pure function over the config and reports every violation, not just the
//! first one found.

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The listener bind address does not parse as host:port.
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    /// The log level is not a valid tracing filter directive.
    #[error("observability.log_level {0:?} is not a valid log filter")]
    LogLevel(String),

    /// The histogram needs at least one bucket boundary.
    #[error("observability.duration_buckets must not be empty")]
    EmptyBuckets,

    /// Bucket boundaries must be finite and positive.
    #[error("observability.duration_buckets[{index}] = {value} is not a positive finite number")]
    InvalidBucket { index: usize, value: f64 },

    /// Bucket boundaries must be strictly ascending.
    #[error("observability.duration_buckets[{index}] = {value} does not exceed the previous bound {previous}")]
    UnsortedBuckets {
        index: usize,
        value: f64,
        previous: f64,
    },

    /// A zero body limit would reject every request with a body.
    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting all violations.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let buckets = &config.observability.duration_buckets;
    if buckets.is_empty() {
        errors.push(ValidationError::EmptyBuckets);
    }
    for (index, &value) in buckets.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ValidationError::InvalidBucket { index, value });
        } else if index > 0 {
            let previous = buckets[index - 1];
            if value <= previous {
                errors.push(ValidationError::UnsortedBuckets {
                    index,
                    value,
                    previous,
                });
            }
        }
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
