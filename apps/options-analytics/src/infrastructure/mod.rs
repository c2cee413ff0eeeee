//! Infrastructure layer - port adapters.
//!
//! Only in-memory adapters live in this crate; live market-data, sentiment,
//! and storage adapters belong to the embedding system.

mod mock;

pub use mock::{FixedSentiment, InMemoryMetricsSink, MockMarketData};
