//! Smallest-unit → display-unit conversion.
//!
//! The raw balance is formatted as an exact decimal string (`U256 / 10^18`)
//! before it becomes an `f64`, so the only rounding is the final, correctly
//! rounded decimal → float step.

use alloy::primitives::utils::format_ether;
use alloy::primitives::U256;

use crate::blockchain::types::{QueryError, QueryResult};

/// Decimals between the smallest unit (wei) and the display unit (ETH).
pub const DISPLAY_DECIMALS: u32 = 18;

/// Exact decimal rendering of `raw` in display units, e.g. `"1.500000000000000000"`.
pub fn format_display_units(raw: U256) -> String {
    format_ether(raw)
}

/// Convert a raw balance to the value exposed on the gauge.
pub fn to_display_units(raw: U256) -> QueryResult<f64> {
    let exact = format_display_units(raw);
    exact.parse::<f64>().map_err(|e| QueryError::Conversion {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}
