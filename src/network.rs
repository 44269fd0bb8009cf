//! Network constants for the tokencharts SDK.

/// Default base URL for the on-chain market data API (pool lookup + OHLCV).
pub const DEFAULT_API_URL: &str = "https://api.geckoterminal.com/api/v2";

/// Default network identifier used when resolving token pools.
pub const DEFAULT_NETWORK: &str = "solana";
