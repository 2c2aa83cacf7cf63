//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file / CLI + environment overrides
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//!
//! RPC_URL_MAPPING
//!     → loader.rs (presence check)
//!     → routing::parser (grammar)
//!     → RoutingTable
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow running without a file
//! - Any configuration error stops startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_routes, ConfigError, MAPPING_ENV_VAR};
pub use schema::{ExporterConfig, ListenerConfig, LogFormat, ObservabilityConfig, RpcConfig};
