//! OHLCV types for the market data API.

use serde::{Deserialize, Serialize};

use crate::shared::{Candle, Timeframe};

/// Query parameters for GET /networks/{network}/pools/{pool}/ohlcv/{timeframe}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhlcvParams {
    /// Candle bucket size (request path segment)
    pub timeframe: Timeframe,
    /// Buckets aggregated per candle (e.g. timeframe=hour, aggregate=4
    /// yields 4-hour candles)
    pub aggregate: Option<u32>,
    /// Max candles returned
    pub limit: Option<u32>,
    /// Only candles at or before this timestamp (seconds)
    pub before_timestamp: Option<i64>,
}

impl OhlcvParams {
    /// Create new params for the given timeframe.
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ..Default::default()
        }
    }

    /// Set the aggregation factor.
    pub fn with_aggregate(mut self, aggregate: u32) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// Set the candle limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only return candles at or before the given timestamp (seconds).
    pub fn with_before(mut self, before_timestamp: i64) -> Self {
        self.before_timestamp = Some(before_timestamp);
        self
    }
}

/// Response for the OHLCV endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvResponse {
    /// Payload envelope
    #[serde(default)]
    pub data: OhlcvData,
}

/// `data` member of the OHLCV response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvData {
    /// Upstream record id
    #[serde(default)]
    pub id: Option<String>,
    /// Domain fields
    #[serde(default)]
    pub attributes: OhlcvAttributes,
}

/// Attributes of the OHLCV response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvAttributes {
    /// Candles, oldest first
    #[serde(default)]
    pub ohlcv_list: Vec<Candle>,
}

impl OhlcvResponse {
    /// The candle series, oldest first.
    pub fn candles(&self) -> &[Candle] {
        &self.data.attributes.ohlcv_list
    }

    /// Consume the response, yielding the candle series.
    pub fn into_candles(self) -> Vec<Candle> {
        self.data.attributes.ohlcv_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builder() {
        let params = OhlcvParams::new(Timeframe::Hour)
            .with_aggregate(4)
            .with_limit(100)
            .with_before(1714521600);

        assert_eq!(params.timeframe, Timeframe::Hour);
        assert_eq!(params.aggregate, Some(4));
        assert_eq!(params.limit, Some(100));
        assert_eq!(params.before_timestamp, Some(1714521600));
    }

    #[test]
    fn test_response_deserialize() {
        let json = r#"{
            "data": {
                "id": "pool-ohlcv",
                "attributes": {
                    "ohlcv_list": [
                        [1714435200, 1.0, 1.2, 0.9, 1.1, 5000.0],
                        [1714449600, 1.1, 1.3, 1.0, 1.2, 6000.0]
                    ]
                }
            }
        }"#;
        let response: OhlcvResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candles().len(), 2);
        assert_eq!(response.candles()[0].close, 1.1);
        assert_eq!(response.candles()[1].timestamp, 1714449600);
    }

    #[test]
    fn test_response_missing_list_defaults_empty() {
        let json = r#"{"data": {"attributes": {}}}"#;
        let response: OhlcvResponse = serde_json::from_str(json).unwrap();
        assert!(response.candles().is_empty());
    }
}
