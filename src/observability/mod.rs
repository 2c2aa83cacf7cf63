//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! collector (samples, failures)
//!     → logging.rs (structured log events for every failure)
//!     → metrics.rs (samples → Prometheus text, per scrape)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Prometheus scrape of the metrics path
//! ```

pub mod logging;
pub mod metrics;
