//! Tracked token identity.

use serde::{Deserialize, Serialize};

/// A token tracked by the refresher.
///
/// The `token_id` is opaque to this crate; it is only ever forwarded to the
/// pool lookup collaborator to resolve a trading pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedToken {
    /// Display symbol, e.g. "BTC". Keys the fetch-state map.
    pub symbol: String,
    /// On-chain token identifier used for pool resolution.
    pub token_id: String,
}

impl TrackedToken {
    /// Create a new tracked token.
    pub fn new(symbol: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            token_id: token_id.into(),
        }
    }
}
