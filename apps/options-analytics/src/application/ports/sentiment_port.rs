//! Sentiment Port (Driven Port)
//!
//! Interface to the sentiment collaborator. The engine only consumes the
//! final scalar score; aggregation of sources happens outside.

use async_trait::async_trait;

use crate::domain::shared::Symbol;

/// Sentiment feed error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SentimentError {
    /// Feed unavailable.
    #[error("Sentiment feed unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// No score for the requested ticker.
    #[error("No sentiment score for {ticker}")]
    ScoreMissing {
        /// The requested ticker.
        ticker: String,
    },
}

/// Port for fetching a sentiment score.
#[async_trait]
pub trait SentimentPort: Send + Sync {
    /// Fetch the sentiment score for a ticker, in `[-1, 1]`.
    async fn fetch_score(&self, ticker: &Symbol) -> Result<f64, SentimentError>;
}
