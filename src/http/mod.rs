//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! GET <metrics_path>
//!     → server.rs (Axum router, trace layer)
//!     → collector (one collection pass)
//!     → observability::metrics (text exposition)
//!     → 200 text/plain response
//! ```

pub mod server;

pub use server::HttpServer;
