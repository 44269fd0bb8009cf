//! Pool lookup types for the market data API.

use serde::{Deserialize, Serialize};

/// Response for GET /networks/{network}/tokens/{token_id}/pools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolsResponse {
    /// Pool records, upstream ordering
    #[serde(default)]
    pub data: Vec<Pool>,
}

/// One liquidity pool record.
///
/// Every field is optional: the upstream omits attributes freely and a partial
/// record must still participate in selection (a missing volume sorts as 0).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pool {
    /// Upstream record id
    #[serde(default)]
    pub id: Option<String>,
    /// Domain fields
    #[serde(default)]
    pub attributes: PoolAttributes,
}

/// Attributes of a pool record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolAttributes {
    /// On-chain pool address
    #[serde(default)]
    pub address: Option<String>,
    /// Human-readable pair name
    #[serde(default)]
    pub name: Option<String>,
    /// USD volume buckets
    #[serde(default)]
    pub volume_usd: Option<VolumeUsd>,
    /// Current token price in USD, stringly typed upstream
    #[serde(default)]
    pub token_price_usd: Option<String>,
}

/// USD volume buckets of a pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeUsd {
    /// Trailing 24h volume
    #[serde(default)]
    pub h24: Option<String>,
}

impl Pool {
    /// Trailing 24h USD volume. Missing or unparseable values count as `0.0`
    /// so the pool stays eligible for selection.
    pub fn volume_24h_usd(&self) -> f64 {
        let raw = self
            .attributes
            .volume_usd
            .as_ref()
            .and_then(|v| v.h24.as_deref());
        match raw {
            Some(text) => text.parse::<f64>().unwrap_or_else(|_| {
                tracing::warn!(volume = text, "unparseable 24h volume, treating as 0");
                0.0
            }),
            None => 0.0,
        }
    }

    /// Current token price in USD, if present and parseable.
    pub fn price_usd(&self) -> Option<f64> {
        self.attributes
            .token_price_usd
            .as_deref()
            .and_then(|p| p.parse::<f64>().ok())
    }

    /// On-chain pool address, if present.
    pub fn address(&self) -> Option<&str> {
        self.attributes.address.as_deref()
    }
}

/// Select the pool with the highest trailing 24h volume.
///
/// Equivalent to a descending stable sort by volume followed by taking the
/// head: on equal volume the earlier record wins.
pub fn best_pool(pools: &[Pool]) -> Option<&Pool> {
    pools.iter().fold(None, |best: Option<&Pool>, pool| {
        match best {
            Some(current) if pool.volume_24h_usd() > current.volume_24h_usd() => Some(pool),
            Some(current) => Some(current),
            None => Some(pool),
        }
    })
}
