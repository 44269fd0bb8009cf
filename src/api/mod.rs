//! REST client module for the market data collaborators.
//!
//! This module provides a type-safe HTTP client for the two endpoints the
//! chart pipeline consumes: liquidity pool lookup by token, and OHLCV candle
//! series by pool.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tokencharts::api::MarketDataClient;
//! use tokencharts::api::types::{best_pool, OhlcvParams};
//! use tokencharts::network::DEFAULT_API_URL;
//! use tokencharts::shared::Timeframe;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketDataClient::new(DEFAULT_API_URL)?;
//!
//!     let pools = client.get_token_pools("solana", "token_id", Some(1)).await?;
//!     let pool = best_pool(&pools.data).and_then(|p| p.address()).unwrap();
//!
//!     let params = OhlcvParams::new(Timeframe::Hour).with_aggregate(4).with_limit(100);
//!     let ohlcv = client.get_pool_ohlcv("solana", pool, &params).await?;
//!     println!("Got {} candles", ohlcv.candles().len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Client Configuration
//!
//! Use the builder pattern for custom configuration:
//!
//! ```rust,ignore
//! use tokencharts::api::{MarketDataClient, RetryConfig};
//! use std::time::Duration;
//!
//! let client = MarketDataClient::builder("https://api.geckoterminal.com/api/v2")
//!     .timeout(Duration::from_secs(10))
//!     .with_retry(RetryConfig::new(3))
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>` which is an alias for `Result<T, ApiError>`.
//! The [`ApiError`] enum covers all possible error cases:
//!
//! ```rust,ignore
//! use tokencharts::api::{MarketDataClient, ApiError};
//!
//! match client.get_token_pools("solana", "bad_id", None).await {
//!     Ok(pools) => println!("{} pools", pools.data.len()),
//!     Err(ApiError::NotFound(msg)) => println!("Unknown token: {}", msg),
//!     Err(ApiError::RateLimited(msg)) => println!("Slow down: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{MarketDataClient, MarketDataClientBuilder, RetryConfig};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use types::*;
