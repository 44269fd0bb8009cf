//! Per-symbol fetch state and the shared chart store.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::chart::ChartDescriptor;

/// Why a symbol's refresh attempt failed.
///
/// All four kinds are recovered locally: they terminate that symbol's attempt
/// for the current pass and are recorded in its [`FetchState`]. The display
/// strings are stable so a renderer can distinguish reasons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// HTTP-level failure or non-OK status from the pool lookup API.
    #[error("Pool lookup failed ({0})")]
    PoolLookup(String),

    /// Lookup succeeded but returned no usable pool.
    #[error("No suitable pool found.")]
    NoPoolFound,

    /// HTTP-level failure or non-OK status from the OHLCV API.
    #[error("OHLCV fetch failed ({0})")]
    OhlcvFetch(String),

    /// OHLCV fetch succeeded but the series was empty.
    #[error("No OHLCV data returned.")]
    NoDataReturned,
}

/// Chart payload published for a symbol once its refresh succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenChart {
    /// Plot-ready series description.
    pub descriptor: ChartDescriptor,
    /// Rolling 24h percentage change.
    pub percentage_change: f64,
    /// Trailing 24h USD volume of the selected pool.
    pub volume_24h_usd: f64,
    /// Current token price in USD, when the pool reports one.
    pub price_usd: Option<f64>,
}

/// Three-way refresh outcome tracked per symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No pass has concluded for this symbol yet.
    Pending,
    /// Last attempt produced a chart.
    Ready(TokenChart),
    /// Last attempt failed.
    Failed(FetchFailure),
}

impl FetchState {
    /// Whether this state is [`FetchState::Ready`].
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    /// The chart payload, if ready.
    pub fn chart(&self) -> Option<&TokenChart> {
        match self {
            FetchState::Ready(chart) => Some(chart),
            _ => None,
        }
    }
}

/// Shared symbol → [`FetchState`] map.
///
/// The only resource shared between refresh tasks and consumers. Each
/// symbol's slot is written once per pass by exactly one task; consumers read
/// snapshots at their own pace.
#[derive(Debug, Clone, Default)]
pub struct ChartStore {
    inner: Arc<RwLock<HashMap<String, FetchState>>>,
}

impl ChartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with every symbol initialized to [`FetchState::Pending`].
    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let map = symbols
            .into_iter()
            .map(|s| (s.into(), FetchState::Pending))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Publish a symbol's state, replacing whatever was there.
    pub async fn publish(&self, symbol: &str, state: FetchState) {
        self.inner.write().await.insert(symbol.to_string(), state);
    }

    /// Get a symbol's current state.
    pub async fn get(&self, symbol: &str) -> Option<FetchState> {
        self.inner.read().await.get(symbol).cloned()
    }

    /// Snapshot the whole map.
    pub async fn snapshot(&self) -> HashMap<String, FetchState> {
        self.inner.read().await.clone()
    }

    /// Number of tracked symbols.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the store tracks no symbols.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
