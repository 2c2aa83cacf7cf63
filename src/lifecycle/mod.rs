//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Parse mapping → Build collector → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Finish in-flight scrapes → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
