//! Chart derivation from candle series.
//!
//! This module is the pure computation core of the SDK: given an ordered
//! candle series it derives a plot-ready descriptor and the rolling 24-hour
//! percentage change. No I/O, no suspension points.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tokencharts::chart::analyze_series;
//!
//! let Some(analysis) = analyze_series(&candles) else {
//!     // empty series — nothing to render
//!     return;
//! };
//! println!("{:+.2}% over 24h", analysis.percentage_change);
//! ```

pub mod analyzer;

// Re-export main types for convenience
pub use analyzer::{analyze_series, analyze_series_at, ChartAnalysis, ChartDescriptor, Trend};
