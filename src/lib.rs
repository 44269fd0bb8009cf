//! # tokencharts
//!
//! Client SDK for token price sparklines: resolves tracked tokens to on-chain
//! liquidity pools, fetches OHLCV candle series, and derives plot-ready chart
//! descriptors with rolling 24-hour percentage changes.
//!
//! ## Modules
//!
//! - [`chart`]: pure chart derivation from candle series (no I/O)
//! - [`api`]: REST client for the pool lookup and OHLCV collaborators
//! - [`refresh`]: staggered, cancellable polling over a set of tracked tokens
//!
//! Plus supporting modules:
//! - [`shared`]: candle and token types used across the crate
//! - [`appearance`]: process-wide trend palette, installed once at bootstrap
//! - [`network`]: default endpoint constants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokencharts::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(MarketDataClient::new(DEFAULT_API_URL)?);
//!     let tokens = vec![
//!         TrackedToken::new("SOL", "So11111111111111111111111111111111111111112"),
//!     ];
//!
//!     let refresher = ChartRefresher::new(client, tokens);
//!     let store = refresher.store();
//!     refresher.run_pass().await;
//!
//!     if let Some(FetchState::Ready(chart)) = store.get("SOL").await {
//!         println!("SOL {:+.2}% over 24h", chart.percentage_change);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Derivation only
//!
//! The analyzer is pure and available without the `http` feature:
//!
//! ```rust,ignore
//! use tokencharts::chart::analyze_series;
//!
//! if let Some(analysis) = analyze_series(&candles) {
//!     println!("{:?} {:+.2}%", analysis.descriptor.trend, analysis.percentage_change);
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Shared candle and token types.
pub mod shared;

/// Pure chart derivation from candle series.
pub mod chart;

/// Process-wide appearance configuration (trend palette).
pub mod appearance;

/// Network endpoint constants.
pub mod network;

/// REST client module for the market data collaborators.
#[cfg(feature = "http")]
pub mod api;

/// Polling refresher for per-symbol chart state.
#[cfg(feature = "http")]
pub mod refresh;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tokencharts::prelude::*;
/// ```
pub mod prelude {
    // Core types and derivation
    pub use crate::chart::{
        analyze_series, analyze_series_at, ChartAnalysis, ChartDescriptor, Trend,
    };
    pub use crate::shared::{Candle, Timeframe, TrackedToken};

    // Appearance
    pub use crate::appearance::AppearanceConfig;

    // Network constants
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_NETWORK};

    // API module exports
    #[cfg(feature = "http")]
    pub use crate::api::{
        best_pool, ApiError, ApiResult, MarketDataClient, MarketDataClientBuilder, OhlcvParams,
        OhlcvResponse, Pool, PoolsResponse, RetryConfig,
    };

    // Refresher exports
    #[cfg(feature = "http")]
    pub use crate::refresh::{
        CancelToken, ChartRefresher, ChartStore, FetchFailure, FetchState, MarketDataSource,
        RefresherConfig, TokenChart,
    };
}
