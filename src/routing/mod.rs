//! Wallet routing subsystem.
//!
//! # Data Flow
//! ```text
//! RPC_URL_MAPPING (raw string)
//!     → parser.rs (split groups, locate separator, validate scheme)
//!     → table.rs (endpoint → ordered wallet list)
//!     → Freeze as immutable RoutingTable
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Any malformed group rejects the whole mapping (fail fast)
//! - Wallet addresses are opaque here; the RPC layer validates them
//! - Duplicate endpoints are rejected rather than merged or overwritten

pub mod parser;
pub mod table;

pub use parser::{parse_mapping, MappingError};
pub use table::RoutingTable;
