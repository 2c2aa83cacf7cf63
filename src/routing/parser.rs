//! `RPC_URL_MAPPING` grammar.
//!
//! # Grammar
//! ```text
//! mapping  := group ( "|" group )*
//! group    := endpoint ":" wallets
//! endpoint := ( "http://" | "https://" ) <text without ':'>
//! wallets  := wallet ( "," wallet )*
//! ```
//!
//! The endpoint/wallet separator is the first `:` after the scheme prefix,
//! so the colon inside `http://` never splits a group. Consequently an
//! endpoint cannot carry an explicit `:port`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::routing::table::RoutingTable;

/// Schemes accepted for RPC endpoints. Matching is case-sensitive.
pub const SUPPORTED_SCHEMES: [&str; 2] = ["http://", "https://"];

const GROUP_SEPARATOR: char = '|';
const ENDPOINT_SEPARATOR: char = ':';
const WALLET_SEPARATOR: char = ',';

/// Errors produced while parsing the mapping. All of them are fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// No `:` follows the endpoint.
    #[error("malformed group: missing endpoint/address separator or empty address list (no separator in '{group}')")]
    MissingSeparator { group: String },

    /// The separator is the last character of the group.
    #[error("malformed group: missing endpoint/address separator or empty address list (no addresses in '{group}')")]
    EmptyAddressList { group: String },

    /// The endpoint does not start with `http://` or `https://`.
    #[error("invalid endpoint: missing scheme in '{endpoint}' (must start with http:// or https://)")]
    MissingScheme { endpoint: String },

    /// Two groups name the same endpoint.
    #[error("duplicate endpoint: '{endpoint}' appears in more than one group")]
    DuplicateEndpoint { endpoint: String },
}

/// Parse a raw mapping string into a [`RoutingTable`].
///
/// The caller guarantees `raw` is non-empty; an empty string is reported as
/// a missing separator.
pub fn parse_mapping(raw: &str) -> Result<RoutingTable, MappingError> {
    let mut routes = BTreeMap::new();

    for group in raw.split(GROUP_SEPARATOR) {
        let (endpoint, wallets) = parse_group(group.trim())?;

        match routes.entry(endpoint.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(wallets);
            }
            Entry::Occupied(slot) => {
                return Err(MappingError::DuplicateEndpoint {
                    endpoint: slot.key().clone(),
                });
            }
        }
    }

    Ok(RoutingTable::new(routes))
}

fn parse_group(group: &str) -> Result<(&str, Vec<String>), MappingError> {
    let separator = find_separator(group).ok_or_else(|| MappingError::MissingSeparator {
        group: group.to_string(),
    })?;

    let (endpoint, rest) = group.split_at(separator);
    let wallets = &rest[ENDPOINT_SEPARATOR.len_utf8()..];
    if wallets.is_empty() {
        return Err(MappingError::EmptyAddressList {
            group: group.to_string(),
        });
    }

    if scheme_prefix(endpoint).is_none() {
        return Err(MappingError::MissingScheme {
            endpoint: endpoint.to_string(),
        });
    }

    let wallets = wallets
        .split(WALLET_SEPARATOR)
        .map(str::to_string)
        .collect();

    Ok((endpoint, wallets))
}

/// Byte offset of the endpoint/wallet separator.
fn find_separator(group: &str) -> Option<usize> {
    let skip = scheme_prefix(group).map_or(0, str::len);
    group[skip..]
        .find(ENDPOINT_SEPARATOR)
        .map(|offset| offset + skip)
}

fn scheme_prefix(text: &str) -> Option<&'static str> {
    SUPPORTED_SCHEMES
        .iter()
        .copied()
        .find(|scheme| text.starts_with(scheme))
}
