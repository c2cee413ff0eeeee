//! Application layer - use cases and port definitions.

pub mod dto;
pub mod ports;
pub mod use_cases;

pub use dto::{AnalysisReport, MetricsRecord};
pub use ports::{
    MarketDataError, MarketDataPort, MetricsSinkError, MetricsSinkPort, SentimentError,
    SentimentPort,
};
pub use use_cases::AnalyzeChainUseCase;
