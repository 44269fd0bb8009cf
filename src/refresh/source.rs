//! The collaborator seam for the refresher.

use async_trait::async_trait;

use crate::api::error::ApiResult;
use crate::api::types::{OhlcvParams, OhlcvResponse, PoolsResponse};
use crate::api::MarketDataClient;

/// The two market data collaborators the refresher depends on.
///
/// [`MarketDataClient`] is the production implementation; tests substitute
/// scripted implementations to exercise the refresher without a network.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// List liquidity pools for a token.
    async fn token_pools(&self, network: &str, token_id: &str) -> ApiResult<PoolsResponse>;

    /// Get the OHLCV candle series for a pool, oldest first.
    async fn pool_ohlcv(
        &self,
        network: &str,
        pool_address: &str,
        params: &OhlcvParams,
    ) -> ApiResult<OhlcvResponse>;
}

#[async_trait]
impl MarketDataSource for MarketDataClient {
    async fn token_pools(&self, network: &str, token_id: &str) -> ApiResult<PoolsResponse> {
        self.get_token_pools(network, token_id, Some(1)).await
    }

    async fn pool_ohlcv(
        &self,
        network: &str,
        pool_address: &str,
        params: &OhlcvParams,
    ) -> ApiResult<OhlcvResponse> {
        self.get_pool_ohlcv(network, pool_address, params).await
    }
}
