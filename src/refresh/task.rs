//! The polling refresher: staggered per-token refresh passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::watch;

use crate::api::types::{best_pool, OhlcvParams};
use crate::chart::analyze_series;
use crate::network::DEFAULT_NETWORK;
use crate::refresh::source::MarketDataSource;
use crate::refresh::state::{ChartStore, FetchFailure, FetchState, TokenChart};
use crate::shared::{Timeframe, TrackedToken};

/// Cooperative teardown flag shared by a refresher and its in-flight tasks.
///
/// Once cancelled, no further state transitions are published for any symbol;
/// responses that arrive afterwards are discarded, not applied.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request teardown. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether teardown has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Refresher configuration.
#[derive(Debug, Clone)]
pub struct RefresherConfig {
    /// Network identifier forwarded to the pool lookup.
    pub network: String,
    /// Per-position delay before a symbol's fetch starts, applied once per
    /// pass to avoid bursting the collaborator.
    pub stagger: Duration,
    /// Candle bucket size for OHLCV requests.
    pub timeframe: Timeframe,
    /// Buckets aggregated per candle.
    pub aggregate: u32,
    /// Max candles requested per series.
    pub candle_limit: u32,
}

impl Default for RefresherConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            stagger: Duration::from_millis(200),
            timeframe: Timeframe::Hour,
            aggregate: 4,
            candle_limit: 100,
        }
    }
}

impl RefresherConfig {
    fn ohlcv_params(&self) -> OhlcvParams {
        OhlcvParams::new(self.timeframe)
            .with_aggregate(self.aggregate)
            .with_limit(self.candle_limit)
    }
}

/// Drives chart refreshes for a set of tracked tokens.
///
/// One pass spawns a task per token, staggered by position. Each task resolves
/// the token's best pool, fetches its candle series, analyzes it, and
/// publishes the outcome to the shared [`ChartStore`]. A failure only affects
/// its own symbol; other tasks proceed. After the first complete pass the
/// initial-load signal fires exactly once, however many symbols failed.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tokencharts::api::MarketDataClient;
/// use tokencharts::network::DEFAULT_API_URL;
/// use tokencharts::refresh::{ChartRefresher, RefresherConfig};
/// use tokencharts::shared::TrackedToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Arc::new(MarketDataClient::new(DEFAULT_API_URL)?);
///     let tokens = vec![
///         TrackedToken::new("SOL", "So11111111111111111111111111111111111111112"),
///         TrackedToken::new("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"),
///     ];
///     let refresher = ChartRefresher::new(client, tokens);
///
///     let store = refresher.store();
///     refresher.run_pass().await;
///
///     for (symbol, state) in store.snapshot().await {
///         println!("{}: {:?}", symbol, state);
///     }
///     Ok(())
/// }
/// ```
pub struct ChartRefresher {
    source: Arc<dyn MarketDataSource>,
    tokens: Vec<TrackedToken>,
    config: RefresherConfig,
    store: ChartStore,
    cancel: CancelToken,
    initial_load_tx: watch::Sender<bool>,
}

impl ChartRefresher {
    /// Create a refresher with the default configuration.
    pub fn new(source: Arc<dyn MarketDataSource>, tokens: Vec<TrackedToken>) -> Self {
        Self::with_config(source, tokens, RefresherConfig::default())
    }

    /// Create a refresher with a custom configuration.
    pub fn with_config(
        source: Arc<dyn MarketDataSource>,
        tokens: Vec<TrackedToken>,
        config: RefresherConfig,
    ) -> Self {
        let store = ChartStore::with_symbols(tokens.iter().map(|t| t.symbol.clone()));
        let (initial_load_tx, _) = watch::channel(false);
        Self {
            source,
            tokens,
            config,
            store,
            cancel: CancelToken::new(),
            initial_load_tx,
        }
    }

    /// The shared state map. Clone is cheap; consumers read at their own pace.
    pub fn store(&self) -> ChartStore {
        self.store.clone()
    }

    /// The teardown token for this refresher.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The tracked tokens, in round-robin order.
    pub fn tokens(&self) -> &[TrackedToken] {
        &self.tokens
    }

    /// The active configuration.
    pub fn config(&self) -> &RefresherConfig {
        &self.config
    }

    /// Subscribe to the initial-load signal.
    ///
    /// The value flips to `true` exactly once, after the first pass has
    /// attempted every symbol.
    pub fn initial_load(&self) -> watch::Receiver<bool> {
        self.initial_load_tx.subscribe()
    }

    /// Whether the first full pass has completed.
    pub fn initial_load_complete(&self) -> bool {
        *self.initial_load_tx.borrow()
    }

    /// Run one full round-robin pass over all tracked tokens.
    ///
    /// Symbols are spawned in fixed order with an `i × stagger` initial delay.
    /// The call returns once every symbol has been attempted; per-symbol
    /// completion order is not otherwise coordinated, so consumers may observe
    /// state updates out of round-robin order.
    pub async fn run_pass(&self) {
        let mut handles = Vec::with_capacity(self.tokens.len());

        for (position, token) in self.tokens.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let config = self.config.clone();
            let store = self.store.clone();
            let cancel = self.cancel.clone();
            let token = token.clone();
            let delay = self.config.stagger * position as u32;

            handles.push(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if cancel.is_cancelled() {
                    return;
                }
                refresh_token(source.as_ref(), &config, &store, &cancel, &token).await;
            }));
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                tracing::warn!("refresh task panicked: {}", e);
            }
        }

        if !self.cancel.is_cancelled() {
            // Flips false -> true on the first pass only; later passes are a no-op.
            self.initial_load_tx.send_if_modified(|done| {
                if *done {
                    false
                } else {
                    *done = true;
                    true
                }
            });
        }
    }

    /// Re-run passes on a fixed period until cancelled.
    ///
    /// One possible external trigger for re-running [`run_pass`](Self::run_pass);
    /// callers with their own trigger (UI focus, push signal) should drive
    /// `run_pass` directly. Teardown is observed at pass boundaries and at
    /// every suspension point inside a pass.
    pub async fn run_until_cancelled(&self, interval: Duration) {
        while !self.cancel.is_cancelled() {
            self.run_pass().await;
            tokio::time::sleep(interval).await;
        }
    }
}

/// One symbol's refresh: pool lookup, OHLCV fetch, analysis, publish.
///
/// Every failure is recovered into the symbol's own [`FetchState`]; nothing
/// here propagates. The cancel token gates each publication so a response
/// arriving after teardown is dropped on the floor.
async fn refresh_token(
    source: &dyn MarketDataSource,
    config: &RefresherConfig,
    store: &ChartStore,
    cancel: &CancelToken,
    token: &TrackedToken,
) {
    tracing::debug!(symbol = %token.symbol, "refreshing chart");

    let pools = match source.token_pools(&config.network, &token.token_id).await {
        Ok(response) => response,
        Err(e) => {
            publish_unless_cancelled(
                store,
                cancel,
                &token.symbol,
                FetchState::Failed(FetchFailure::PoolLookup(e.to_string())),
            )
            .await;
            return;
        }
    };
    if cancel.is_cancelled() {
        return;
    }

    // A best pool without an address is as unusable as no pool at all.
    let Some((address, pool)) = best_pool(&pools.data)
        .and_then(|p| p.address().map(|a| (a.to_string(), p)))
    else {
        publish_unless_cancelled(
            store,
            cancel,
            &token.symbol,
            FetchState::Failed(FetchFailure::NoPoolFound),
        )
        .await;
        return;
    };
    // Volume and price ride along from the chosen pool.
    let volume_24h_usd = pool.volume_24h_usd();
    let price_usd = pool.price_usd();

    let ohlcv = match source
        .pool_ohlcv(&config.network, &address, &config.ohlcv_params())
        .await
    {
        Ok(response) => response,
        Err(e) => {
            publish_unless_cancelled(
                store,
                cancel,
                &token.symbol,
                FetchState::Failed(FetchFailure::OhlcvFetch(e.to_string())),
            )
            .await;
            return;
        }
    };
    if cancel.is_cancelled() {
        return;
    }

    let candles = ohlcv.into_candles();
    let state = match analyze_series(&candles) {
        Some(analysis) => FetchState::Ready(TokenChart {
            descriptor: analysis.descriptor,
            percentage_change: analysis.percentage_change,
            volume_24h_usd,
            price_usd,
        }),
        None => FetchState::Failed(FetchFailure::NoDataReturned),
    };

    publish_unless_cancelled(store, cancel, &token.symbol, state).await;
}

async fn publish_unless_cancelled(
    store: &ChartStore,
    cancel: &CancelToken,
    symbol: &str,
    state: FetchState,
) {
    if cancel.is_cancelled() {
        tracing::debug!(symbol, "discarding refresh result after teardown");
        return;
    }
    store.publish(symbol, state).await;
}
