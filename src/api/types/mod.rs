//! Request and response types for the market data API.
//!
//! The upstream speaks a JSON:API dialect: every payload is wrapped in a
//! `data` envelope and domain fields live under `attributes`. Fields this
//! crate does not consume are not modeled.

pub mod ohlcv;
pub mod pool;

// Re-export all types for convenience
pub use ohlcv::*;
pub use pool::*;
