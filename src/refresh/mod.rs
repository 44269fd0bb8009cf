//! Polling refresher for per-symbol chart state.
//!
//! The refresher resolves each tracked token to its highest-volume liquidity
//! pool, fetches that pool's OHLCV series, runs it through the chart
//! analyzer, and publishes a three-way [`FetchState`] per symbol into a
//! shared [`ChartStore`].
//!
//! Failures are isolated per symbol: one token's dead pool lookup never
//! blocks the others. Teardown is cooperative via [`CancelToken`] — once
//! cancelled, in-flight results are discarded instead of published.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokencharts::api::MarketDataClient;
//! use tokencharts::network::DEFAULT_API_URL;
//! use tokencharts::refresh::ChartRefresher;
//! use tokencharts::shared::TrackedToken;
//!
//! let client = Arc::new(MarketDataClient::new(DEFAULT_API_URL)?);
//! let refresher = ChartRefresher::new(client, tokens);
//!
//! let store = refresher.store();
//! let cancel = refresher.cancel_token();
//! let mut initial_load = refresher.initial_load();
//!
//! tokio::spawn(async move {
//!     refresher.run_until_cancelled(Duration::from_secs(60)).await;
//! });
//!
//! initial_load.wait_for(|done| *done).await?;
//! // render from store.snapshot(); call cancel.cancel() on teardown
//! ```

pub mod source;
pub mod state;
pub mod task;

// Re-export main types for convenience
pub use source::MarketDataSource;
pub use state::{ChartStore, FetchFailure, FetchState, TokenChart};
pub use task::{CancelToken, ChartRefresher, RefresherConfig};
