//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ExporterConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ExporterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.metrics_path '{0}' must start with '/'")]
    MetricsPath(String),

    #[error("rpc.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !config.listener.metrics_path.starts_with('/') {
        errors.push(ValidationError::MetricsPath(
            config.listener.metrics_path.clone(),
        ));
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
