//! Candle types shared between the API client and the chart analyzer.

use serde::{Deserialize, Serialize};

/// Wire representation of a candle: `[timestamp, open, high, low, close, volume]`.
type CandleTuple = (i64, f64, f64, f64, f64, f64);

/// One OHLCV observation over a fixed time bucket.
///
/// The API delivers candles as positional 6-tuples with the timestamp in
/// seconds since epoch; [`Candle::timestamp_ms`] converts to the millisecond
/// domain used everywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandleTuple", into = "CandleTuple")]
pub struct Candle {
    /// Bucket start, seconds since epoch (source unit).
    pub timestamp: i64,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price — the only field the analyzer consumes.
    pub close: f64,
    /// Traded volume over the bucket. Carried through for display.
    pub volume: f64,
}

impl Candle {
    /// Bucket start in milliseconds since epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp * 1000
    }
}

impl From<CandleTuple> for Candle {
    fn from((timestamp, open, high, low, close, volume): CandleTuple) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl From<Candle> for CandleTuple {
    fn from(c: Candle) -> Self {
        (c.timestamp, c.open, c.high, c.low, c.close, c.volume)
    }
}

/// Candle bucket size, as spelled in the OHLCV endpoint path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Minute buckets
    #[serde(rename = "minute")]
    Minute,
    /// Hour buckets
    #[default]
    #[serde(rename = "hour")]
    Hour,
    /// Day buckets
    #[serde(rename = "day")]
    Day,
}

impl Timeframe {
    /// Get the string representation used in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
