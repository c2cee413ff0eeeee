//! Application Ports (Driven)
//!
//! Interfaces to the external collaborators: market data, sentiment, and
//! persistence. The engine consumes and produces values through these; it
//! never owns their I/O.

mod market_data_port;
mod metrics_sink_port;
mod sentiment_port;

pub use market_data_port::{MarketDataError, MarketDataPort};
pub use metrics_sink_port::{MetricsSinkError, MetricsSinkPort};
pub use sentiment_port::{SentimentError, SentimentPort};
