//! Market Data Port (Driven Port)
//!
//! Interface to the market-data collaborator supplying chain snapshots and
//! the volatility-index context. Fetching happens before the pipeline runs;
//! the calculators never see this interface.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::chain::{OptionChainSnapshot, VolatilityHistoryPoint};
use crate::domain::shared::Symbol;

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Unknown ticker.
    #[error("Ticker not found: {ticker}")]
    TickerNotFound {
        /// The unknown ticker.
        ticker: String,
    },

    /// No chain for the requested expiration.
    #[error("No option chain for {ticker} expiring {expiration}")]
    ChainUnavailable {
        /// The requested ticker.
        ticker: String,
        /// The requested expiration.
        expiration: NaiveDate,
    },

    /// Data temporarily unavailable.
    #[error("Market data unavailable")]
    DataUnavailable,
}

/// Port for fetching market data.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the option chain snapshot for a ticker and expiration.
    async fn fetch_chain(
        &self,
        ticker: &Symbol,
        expiration: NaiveDate,
    ) -> Result<OptionChainSnapshot, MarketDataError>;

    /// Fetch the volatility-index history window.
    async fn fetch_volatility_history(&self)
    -> Result<VolatilityHistoryPoint, MarketDataError>;

    /// Fetch the daily market return in percent.
    async fn fetch_market_return(&self) -> Result<f64, MarketDataError>;
}
