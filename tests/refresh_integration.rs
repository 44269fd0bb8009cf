//! Integration tests for the polling refresher.
//!
//! A scripted [`MarketDataSource`] stands in for the HTTP collaborators so
//! failure isolation, cancellation, and the initial-load signal can be
//! exercised without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use tokencharts::api::types::{OhlcvParams, OhlcvResponse, Pool, PoolsResponse};
use tokencharts::api::{ApiError, ApiResult};
use tokencharts::refresh::{
    ChartRefresher, FetchFailure, FetchState, MarketDataSource, RefresherConfig,
};
use tokencharts::shared::{Candle, TrackedToken};

// =============================================================================
// Scripted source
// =============================================================================

/// Per-token pool lookup behavior.
enum PoolScript {
    /// Respond with these pools.
    Ok(Vec<Pool>),
    /// Respond with these pools after a delay.
    Delayed(Duration, Vec<Pool>),
    /// Fail with a server error.
    Fail(String),
    /// Fail on the first call, respond with these pools afterwards.
    FailOnce(String, Vec<Pool>),
}

struct ScriptedSource {
    /// Keyed by token id.
    pools: HashMap<String, PoolScript>,
    /// Candle series keyed by pool address.
    candles: HashMap<String, Vec<Candle>>,
    pool_calls: AtomicUsize,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            pools: HashMap::new(),
            candles: HashMap::new(),
            pool_calls: AtomicUsize::new(0),
        }
    }

    fn with_pools(mut self, token_id: &str, script: PoolScript) -> Self {
        self.pools.insert(token_id.to_string(), script);
        self
    }

    fn with_candles(mut self, pool_address: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(pool_address.to_string(), candles);
        self
    }
}

#[async_trait]
impl MarketDataSource for ScriptedSource {
    async fn token_pools(&self, _network: &str, token_id: &str) -> ApiResult<PoolsResponse> {
        let call = self.pool_calls.fetch_add(1, Ordering::SeqCst);
        match self.pools.get(token_id) {
            Some(PoolScript::Ok(pools)) => Ok(PoolsResponse { data: pools.clone() }),
            Some(PoolScript::Delayed(delay, pools)) => {
                tokio::time::sleep(*delay).await;
                Ok(PoolsResponse { data: pools.clone() })
            }
            Some(PoolScript::Fail(msg)) => Err(ApiError::ServerError(msg.clone())),
            Some(PoolScript::FailOnce(msg, pools)) => {
                if call == 0 {
                    Err(ApiError::ServerError(msg.clone()))
                } else {
                    Ok(PoolsResponse { data: pools.clone() })
                }
            }
            None => Ok(PoolsResponse::default()),
        }
    }

    async fn pool_ohlcv(
        &self,
        _network: &str,
        pool_address: &str,
        _params: &OhlcvParams,
    ) -> ApiResult<OhlcvResponse> {
        match self.candles.get(pool_address) {
            Some(candles) => {
                let json = serde_json::json!({
                    "data": {"attributes": {"ohlcv_list": candles}}
                });
                Ok(serde_json::from_value(json).expect("valid ohlcv payload"))
            }
            None => Err(ApiError::NotFound("unknown pool".to_string())),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn pool(address: &str, volume_h24: Option<&str>) -> Pool {
    let json = match volume_h24 {
        Some(v) => serde_json::json!({
            "attributes": {
                "address": address,
                "volume_usd": {"h24": v},
                "token_price_usd": "1.25"
            }
        }),
        None => serde_json::json!({"attributes": {"address": address}}),
    };
    serde_json::from_value(json).expect("valid pool payload")
}

/// A rising series of hourly candles ending now.
fn rising_series(hours: i64) -> Vec<Candle> {
    let now = Utc::now().timestamp();
    (0..hours)
        .map(|i| {
            let age = hours - 1 - i;
            let close = 100.0 + i as f64;
            Candle::from((now - age * 3600, close, close, close, close, 1000.0))
        })
        .collect()
}

fn fast_config() -> RefresherConfig {
    RefresherConfig {
        stagger: Duration::ZERO,
        ..Default::default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_store_starts_pending() {
    let source = Arc::new(ScriptedSource::new());
    let refresher = ChartRefresher::with_config(
        source,
        vec![TrackedToken::new("SOL", "sol-id")],
        fast_config(),
    );

    let store = refresher.store();
    assert_eq!(store.get("SOL").await, Some(FetchState::Pending));
    assert!(!refresher.initial_load_complete());
}

#[tokio::test]
async fn test_successful_pass_publishes_ready() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_pools("sol-id", PoolScript::Ok(vec![pool("P1", Some("500000"))]))
            .with_candles("P1", rising_series(48)),
    );
    let refresher = ChartRefresher::with_config(
        source,
        vec![TrackedToken::new("SOL", "sol-id")],
        fast_config(),
    );

    refresher.run_pass().await;

    let state = refresher.store().get("SOL").await.unwrap();
    let chart = state.chart().expect("SOL should be ready");
    assert_eq!(chart.descriptor.price_points.len(), 48);
    assert_eq!(chart.volume_24h_usd, 500000.0);
    assert_eq!(chart.price_usd, Some(1.25));
    assert!(chart.percentage_change > 0.0);
}

#[tokio::test]
async fn test_failure_isolation_and_initial_load_fires_once() {
    // One symbol's collaborator failure must not block the others, and the
    // initial-load signal fires exactly once after all symbols are attempted.
    let source = Arc::new(
        ScriptedSource::new()
            .with_pools("good-id", PoolScript::Ok(vec![pool("P1", Some("100"))]))
            .with_pools("bad-id", PoolScript::Fail("boom".to_string()))
            .with_candles("P1", rising_series(10)),
    );
    let tokens = vec![
        TrackedToken::new("BAD", "bad-id"),
        TrackedToken::new("GOOD", "good-id"),
        TrackedToken::new("EMPTY", "unknown-id"),
    ];
    let refresher = ChartRefresher::with_config(source, tokens, fast_config());
    let mut initial_load = refresher.initial_load();

    refresher.run_pass().await;

    let store = refresher.store();
    assert!(matches!(
        store.get("BAD").await,
        Some(FetchState::Failed(FetchFailure::PoolLookup(_)))
    ));
    assert!(store.get("GOOD").await.unwrap().is_ready());
    assert_eq!(
        store.get("EMPTY").await,
        Some(FetchState::Failed(FetchFailure::NoPoolFound))
    );

    // Signal observed exactly once across passes.
    assert!(initial_load.has_changed().unwrap());
    initial_load.borrow_and_update();
    assert!(refresher.initial_load_complete());

    refresher.run_pass().await;
    assert!(!initial_load.has_changed().unwrap());
}

#[tokio::test]
async fn test_empty_series_is_no_data_failure() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_pools("sol-id", PoolScript::Ok(vec![pool("P1", Some("100"))]))
            .with_candles("P1", Vec::new()),
    );
    let refresher = ChartRefresher::with_config(
        source,
        vec![TrackedToken::new("SOL", "sol-id")],
        fast_config(),
    );

    refresher.run_pass().await;

    assert_eq!(
        refresher.store().get("SOL").await,
        Some(FetchState::Failed(FetchFailure::NoDataReturned))
    );
}

#[tokio::test]
async fn test_pool_without_address_is_no_pool_found() {
    let json = serde_json::json!({"attributes": {"volume_usd": {"h24": "900"}}});
    let addressless: Pool = serde_json::from_value(json).unwrap();
    let source = Arc::new(
        ScriptedSource::new().with_pools("sol-id", PoolScript::Ok(vec![addressless])),
    );
    let refresher = ChartRefresher::with_config(
        source,
        vec![TrackedToken::new("SOL", "sol-id")],
        fast_config(),
    );

    refresher.run_pass().await;

    assert_eq!(
        refresher.store().get("SOL").await,
        Some(FetchState::Failed(FetchFailure::NoPoolFound))
    );
}

#[tokio::test]
async fn test_new_pass_overwrites_failed_state() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_pools(
                "sol-id",
                PoolScript::FailOnce("flaky".to_string(), vec![pool("P1", Some("100"))]),
            )
            .with_candles("P1", rising_series(10)),
    );
    let refresher = ChartRefresher::with_config(
        source,
        vec![TrackedToken::new("SOL", "sol-id")],
        fast_config(),
    );
    let store = refresher.store();

    refresher.run_pass().await;
    assert!(matches!(
        store.get("SOL").await,
        Some(FetchState::Failed(FetchFailure::PoolLookup(_)))
    ));

    refresher.run_pass().await;
    assert!(store.get("SOL").await.unwrap().is_ready());
}

#[tokio::test]
async fn test_cancellation_discards_inflight_results() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_pools(
                "sol-id",
                PoolScript::Delayed(Duration::from_millis(100), vec![pool("P1", Some("100"))]),
            )
            .with_candles("P1", rising_series(10)),
    );
    let refresher = Arc::new(ChartRefresher::with_config(
        source,
        vec![TrackedToken::new("SOL", "sol-id")],
        fast_config(),
    ));
    let store = refresher.store();
    let cancel = refresher.cancel_token();

    let pass = {
        let refresher = Arc::clone(&refresher);
        tokio::spawn(async move { refresher.run_pass().await })
    };

    // Tear down while the pool lookup is still in flight.
    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();
    pass.await.unwrap();

    // The in-flight response was discarded, and no completion signal fired.
    assert_eq!(store.get("SOL").await, Some(FetchState::Pending));
    assert!(!refresher.initial_load_complete());
}

#[tokio::test]
async fn test_stagger_orders_fetch_starts() {
    // With a measurable stagger, position 1 must not start before its offset.
    let source = Arc::new(
        ScriptedSource::new()
            .with_pools("a-id", PoolScript::Ok(vec![pool("PA", Some("1"))]))
            .with_pools("b-id", PoolScript::Ok(vec![pool("PB", Some("1"))]))
            .with_candles("PA", rising_series(4))
            .with_candles("PB", rising_series(4)),
    );
    let config = RefresherConfig {
        stagger: Duration::from_millis(50),
        ..Default::default()
    };
    let refresher = ChartRefresher::with_config(
        source,
        vec![
            TrackedToken::new("A", "a-id"),
            TrackedToken::new("B", "b-id"),
        ],
        config,
    );

    let started = std::time::Instant::now();
    refresher.run_pass().await;
    let elapsed = started.elapsed();

    // Pass duration is at least the last position's stagger offset.
    assert!(elapsed >= Duration::from_millis(50));
    assert!(refresher.store().get("A").await.unwrap().is_ready());
    assert!(refresher.store().get("B").await.unwrap().is_ready());
}
