// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Options Analytics Engine
//!
//! Derives market-risk indicators from a snapshot of an options chain
//! (calls and puts for one underlying and one expiration) and turns them
//! into structured alerts.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! - **Domain**: immutable value objects
//!   - `chain`: `OptionContract`, `OptionChainSnapshot`, `VolatilityHistoryPoint`
//!   - `shared`: `Symbol`, `Timestamp`
//! - **Analytics**: the pure calculator pipeline
//!   - implied-volatility estimation and statistics, skew, put/call ratios,
//!     volatility regimes, systemic fragility, option walls / max pain,
//!     signals
//! - **Application**: orchestration and boundaries
//!   - `ports`: `MarketDataPort`, `SentimentPort`, `MetricsSinkPort`
//!   - `use_cases`: `AnalyzeChainUseCase`
//!   - `dto`: `MetricsRecord`, `AnalysisReport`
//! - **Infrastructure**: in-memory port adapters for testing/embedding
//!
//! Every calculator is a pure function over immutable inputs: missing data
//! degrades to documented defaults with `is_degraded` set, and undefined
//! metrics are `None`, never a conflated zero. The implied-volatility
//! estimate is an engineered heuristic, not a Black-Scholes inversion.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - immutable value objects.
pub mod domain;

/// Analytics layer - the calculator pipeline.
pub mod analytics;

/// Application layer - use cases and ports.
pub mod application;

/// Infrastructure layer - in-memory port adapters.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

/// Crate-level error type.
pub mod error;

// Domain re-exports
pub use domain::chain::{OptionChainSnapshot, OptionContract, OptionSide, VolatilityHistoryPoint};
pub use domain::shared::{Symbol, Timestamp};

// Analytics re-exports
pub use analytics::{
    ChainAnalyzer, ChainMetrics, DeltaSkew, FragilityConditions, FragilityResult, FragilityScorer,
    FragilityTier,
    HedgingPosture, IvEstimator, IvStatsCalculator, IvStatsResult, MarketContext, PcrCalculator,
    PcrResult, RegimeClassifier,
    RegimeResult, Signal, SignalGenerator, SignalKind, SkewCalculator, SkewResult, VolatilityLevel,
    VolatilityRegime, Wall, WallLocator, WallsResult,
};

// Application re-exports
pub use application::{
    AnalysisReport, AnalyzeChainUseCase, MarketDataError, MarketDataPort, MetricsRecord,
    MetricsSinkError, MetricsSinkPort, SentimentError, SentimentPort,
};
pub use config::{AnalyticsConfig, ConfigError, load_config};
pub use error::AnalyticsError;
pub use infrastructure::{FixedSentiment, InMemoryMetricsSink, MockMarketData};
