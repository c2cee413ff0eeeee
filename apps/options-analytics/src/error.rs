//! Crate-level error type.
//!
//! The calculators themselves never fail: missing inputs degrade to
//! documented defaults with `is_degraded` set. Errors only surface at the
//! application boundary (port failures, configuration).

use thiserror::Error;

use crate::application::ports::{MarketDataError, MetricsSinkError, SentimentError};
use crate::config::ConfigError;

/// Errors from the application layer.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The market-data collaborator failed to supply a snapshot.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// The sentiment collaborator failed.
    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    /// The persistence collaborator rejected the computed record.
    #[error("Metrics sink error: {0}")]
    MetricsSink(#[from] MetricsSinkError),

    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
