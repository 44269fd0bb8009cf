//! Candle series analysis: chart descriptor + rolling 24h change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::Candle;

/// Rolling window for the percentage-change anchor (24 hours, in ms).
const CHANGE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Direction of a series, decided by comparing first and last close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Last close at or above the first close.
    #[serde(rename = "positive")]
    Positive,
    /// Last close below the first close.
    #[serde(rename = "negative")]
    Negative,
}

/// Renderer-agnostic description of a sparkline.
///
/// `price_points` and `time_points` are positionally paired and preserve the
/// input order of the candle series. Translating [`Trend`] into concrete
/// colors, gradients, or axis cosmetics is the renderer's concern (see
/// [`AppearanceConfig`](crate::appearance::AppearanceConfig)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    /// Series direction.
    pub trend: Trend,
    /// Close price per candle, input order.
    pub price_points: Vec<f64>,
    /// Millisecond timestamp per candle, input order.
    pub time_points: Vec<i64>,
}

/// Output of a single analyzer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnalysis {
    /// Plot-ready series description.
    pub descriptor: ChartDescriptor,
    /// Percent change of the latest close against the ~24h-ago anchor close.
    ///
    /// `0.0` when the anchor is zero or unusable.
    pub percentage_change: f64,
}

/// Analyze a candle series against the current wall clock.
///
/// Returns `None` for an empty series. See [`analyze_series_at`] for the
/// full contract.
pub fn analyze_series(candles: &[Candle]) -> Option<ChartAnalysis> {
    analyze_series_at(candles, Utc::now())
}

/// Analyze a candle series against an explicit `now`.
///
/// The series must be ordered oldest-to-newest; this function does not sort.
///
/// The 24h anchor is found by scanning backward from the newest candle and
/// taking the first one whose timestamp is at or before `now - 24h`. When the
/// whole series is younger than 24h, the oldest candle is the anchor, so a
/// short series still yields a change against its earliest data point. A zero
/// or non-finite anchor close short-circuits the change to `0.0` — malformed
/// price data never becomes an error here.
///
/// Repeated calls with the same series and a `now` that does not move the
/// cutoff past any candle produce identical output.
pub fn analyze_series_at(candles: &[Candle], now: DateTime<Utc>) -> Option<ChartAnalysis> {
    if candles.is_empty() {
        return None;
    }

    let cutoff_ms = now.timestamp_millis() - CHANGE_WINDOW_MS;

    let mut latest_close: Option<f64> = None;
    let mut anchor_close: Option<f64> = None;

    // Newest to oldest: the first candle seen is the latest close, the first
    // candle at or before the cutoff is the anchor.
    for candle in candles.iter().rev() {
        if latest_close.is_none() {
            latest_close = Some(candle.close);
        }
        if anchor_close.is_none() && candle.timestamp_ms() <= cutoff_ms {
            anchor_close = Some(candle.close);
        }
        if latest_close.is_some() && anchor_close.is_some() {
            break;
        }
    }

    // Series spans less than 24h: anchor on the oldest available candle.
    let anchor_close = anchor_close.or_else(|| candles.first().map(|c| c.close));

    let percentage_change = match (anchor_close, latest_close) {
        (Some(anchor), Some(latest)) if anchor != 0.0 && anchor.is_finite() => {
            ((latest - anchor) / anchor) * 100.0
        }
        _ => 0.0,
    };

    let price_points: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let time_points: Vec<i64> = candles.iter().map(|c| c.timestamp_ms()).collect();

    // Single-candle series compares a close against itself: Positive.
    // A NaN close fails the >= comparison and lands on Negative.
    let first = price_points[0];
    let last = price_points[price_points.len() - 1];
    let trend = if last >= first {
        Trend::Positive
    } else {
        Trend::Negative
    };

    Some(ChartAnalysis {
        descriptor: ChartDescriptor {
            trend,
            price_points,
            time_points,
        },
        percentage_change,
    })
}
