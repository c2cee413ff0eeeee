//! Analyze Chain Use Case
//!
//! Orchestrates one analysis cycle: fetch the snapshot and market context
//! through the driven ports, run the calculator pipeline, generate signals,
//! persist the flattened record, and return the report.
//!
//! Missing context (volatility history, market return, sentiment) degrades
//! gracefully; only a failed snapshot fetch or a persistence failure is an
//! error.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::analytics::pipeline::{ChainAnalyzer, MarketContext};
use crate::analytics::signals::{Signal, SignalGenerator};
use crate::application::dto::{AnalysisReport, MetricsRecord};
use crate::application::ports::{MarketDataPort, MetricsSinkPort, SentimentPort};
use crate::config::AnalyticsConfig;
use crate::domain::shared::Symbol;
use crate::error::AnalyticsError;

/// Use case running the full analysis cycle for one ticker/expiration.
pub struct AnalyzeChainUseCase<M, S, P>
where
    M: MarketDataPort,
    S: SentimentPort,
    P: MetricsSinkPort,
{
    market_data: Arc<M>,
    sentiment: Arc<S>,
    sink: Arc<P>,
    analyzer: ChainAnalyzer,
    // Session-owned trailing buffer; one lock guards repeated invocations.
    signals: Mutex<SignalGenerator>,
}

impl<M, S, P> AnalyzeChainUseCase<M, S, P>
where
    M: MarketDataPort,
    S: SentimentPort,
    P: MetricsSinkPort,
{
    /// Create a new use case.
    #[must_use]
    pub fn new(market_data: Arc<M>, sentiment: Arc<S>, sink: Arc<P>) -> Self {
        Self::with_config(market_data, sentiment, sink, &AnalyticsConfig::default())
    }

    /// Create a new use case with explicit configuration.
    #[must_use]
    pub fn with_config(
        market_data: Arc<M>,
        sentiment: Arc<S>,
        sink: Arc<P>,
        config: &AnalyticsConfig,
    ) -> Self {
        Self {
            market_data,
            sentiment,
            sink,
            analyzer: ChainAnalyzer::new(config),
            signals: Mutex::new(SignalGenerator::with_limit(config.signal_history_limit)),
        }
    }

    /// Execute one analysis cycle.
    ///
    /// # Errors
    ///
    /// Returns an error when the chain fetch or the metrics write fails.
    /// Missing volatility history, market return, or sentiment degrade to
    /// defaults instead.
    pub async fn execute(
        &self,
        ticker: &Symbol,
        expiration: NaiveDate,
    ) -> Result<AnalysisReport, AnalyticsError> {
        let snapshot = self.market_data.fetch_chain(ticker, expiration).await?;

        let volatility_history = match self.market_data.fetch_volatility_history().await {
            Ok(history) => Some(history),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "no volatility history; skipping regime");
                None
            }
        };
        let market_return = match self.market_data.fetch_market_return().await {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "no market return available");
                None
            }
        };
        let sentiment_score = match self.sentiment.fetch_score(ticker).await {
            Ok(score) => score.clamp(-1.0, 1.0),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "sentiment unavailable; using 0");
                0.0
            }
        };

        let market = MarketContext {
            volatility_history,
            market_return,
            sentiment_score,
        };
        let metrics = self.analyzer.analyze(&snapshot, &market);

        let signals = {
            let mut generator = self
                .signals
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            generator.generate(ticker, &metrics.skew, &metrics.pcr, sentiment_score)
        };

        let record = MetricsRecord::from_metrics(ticker.clone(), expiration, &metrics);
        self.sink.persist_metrics(&record).await?;
        if !signals.is_empty() {
            self.sink.persist_signals(&signals).await?;
        }

        info!(
            ticker = %ticker,
            expiration = %expiration,
            degraded = record.is_degraded,
            signals = signals.len(),
            "analysis cycle complete"
        );

        Ok(AnalysisReport {
            ticker: ticker.clone(),
            expiration,
            metrics,
            signals,
        })
    }

    /// Most recent signals from the session buffer, newest last.
    #[must_use]
    pub fn recent_signals(&self, ticker: Option<&Symbol>, limit: usize) -> Vec<Signal> {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recent_signals(ticker, limit)
    }

    /// Drop the session's trailing signal history.
    pub fn clear_signals(&self) {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear_signals();
    }
}
