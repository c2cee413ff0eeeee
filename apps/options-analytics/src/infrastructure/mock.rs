//! In-memory port adapters for testing and embedding without live feeds.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::analytics::signals::Signal;
use crate::application::dto::MetricsRecord;
use crate::application::ports::{
    MarketDataError, MarketDataPort, MetricsSinkError, MetricsSinkPort, SentimentError,
    SentimentPort,
};
use crate::domain::chain::{OptionChainSnapshot, VolatilityHistoryPoint};
use crate::domain::shared::Symbol;

/// Mock market data source holding preloaded snapshots.
#[derive(Debug, Default)]
pub struct MockMarketData {
    snapshots: RwLock<HashMap<(String, NaiveDate), OptionChainSnapshot>>,
    volatility_history: RwLock<Option<VolatilityHistoryPoint>>,
    market_return: RwLock<Option<f64>>,
}

impl MockMarketData {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a snapshot for its own ticker/expiration key.
    pub fn set_chain(&self, snapshot: OptionChainSnapshot) {
        let key = (snapshot.ticker.as_str().to_string(), snapshot.expiration);
        self.snapshots.write().unwrap().insert(key, snapshot);
    }

    /// Set the volatility history the mock serves.
    pub fn set_volatility_history(&self, history: VolatilityHistoryPoint) {
        *self.volatility_history.write().unwrap() = Some(history);
    }

    /// Set the daily market return the mock serves.
    pub fn set_market_return(&self, market_return: f64) {
        *self.market_return.write().unwrap() = Some(market_return);
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn fetch_chain(
        &self,
        ticker: &Symbol,
        expiration: NaiveDate,
    ) -> Result<OptionChainSnapshot, MarketDataError> {
        self.snapshots
            .read()
            .unwrap()
            .get(&(ticker.as_str().to_string(), expiration))
            .cloned()
            .ok_or_else(|| MarketDataError::ChainUnavailable {
                ticker: ticker.as_str().to_string(),
                expiration,
            })
    }

    async fn fetch_volatility_history(
        &self,
    ) -> Result<VolatilityHistoryPoint, MarketDataError> {
        let guard = self.volatility_history.read().unwrap();
        (*guard).ok_or(MarketDataError::DataUnavailable)
    }

    async fn fetch_market_return(&self) -> Result<f64, MarketDataError> {
        let guard = self.market_return.read().unwrap();
        (*guard).ok_or(MarketDataError::DataUnavailable)
    }
}

/// Sentiment source returning a fixed score.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSentiment {
    score: Option<f64>,
}

impl FixedSentiment {
    /// Always return the given score.
    #[must_use]
    pub const fn new(score: f64) -> Self {
        Self { score: Some(score) }
    }

    /// Always fail, simulating an unavailable feed.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { score: None }
    }
}

#[async_trait]
impl SentimentPort for FixedSentiment {
    async fn fetch_score(&self, ticker: &Symbol) -> Result<f64, SentimentError> {
        self.score.ok_or_else(|| SentimentError::ScoreMissing {
            ticker: ticker.as_str().to_string(),
        })
    }
}

/// Metrics sink collecting records and signals in memory.
#[derive(Debug, Default)]
pub struct InMemoryMetricsSink {
    records: RwLock<Vec<MetricsRecord>>,
    signals: RwLock<Vec<Signal>>,
}

impl InMemoryMetricsSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All persisted records.
    #[must_use]
    pub fn records(&self) -> Vec<MetricsRecord> {
        self.records.read().unwrap().clone()
    }

    /// All persisted signals.
    #[must_use]
    pub fn signals(&self) -> Vec<Signal> {
        self.signals.read().unwrap().clone()
    }
}

#[async_trait]
impl MetricsSinkPort for InMemoryMetricsSink {
    async fn persist_metrics(&self, record: &MetricsRecord) -> Result<(), MetricsSinkError> {
        self.records.write().unwrap().push(record.clone());
        Ok(())
    }

    async fn persist_signals(&self, signals: &[Signal]) -> Result<(), MetricsSinkError> {
        self.signals.write().unwrap().extend_from_slice(signals);
        Ok(())
    }
}
