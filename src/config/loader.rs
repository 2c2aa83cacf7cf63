//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ExporterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{parse_mapping, MappingError, RoutingTable};

/// Environment variable holding the endpoint → wallets mapping.
pub const MAPPING_ENV_VAR: &str = "RPC_URL_MAPPING";

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("RPC_URL_MAPPING environment variable must be set")]
    MissingMapping,

    #[error("Error parsing RPC_URL_MAPPING: {0}")]
    Mapping(#[from] MappingError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ExporterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ExporterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Validate a config that was assembled without a file (defaults + overrides).
pub fn check_config(config: ExporterConfig) -> Result<ExporterConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the routing table from the raw mapping value.
///
/// A missing or blank value is rejected before the parser sees it.
pub fn load_routes(raw: Option<&str>) -> Result<RoutingTable, ConfigError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(parse_mapping(raw)?),
        _ => Err(ConfigError::MissingMapping),
    }
}
