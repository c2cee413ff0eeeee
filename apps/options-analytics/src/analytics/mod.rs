//! Analytics layer - the options analytics engine proper.
//!
//! Eight pure calculators plus the pipeline tying them together:
//!
//! 1. [`iv::IvEstimator`] - heuristic per-contract implied volatility
//! 2. [`iv_stats::IvStatsCalculator`] - provider-IV summary statistics
//! 3. [`skew::SkewCalculator`] - IV curves, delta skews, skew index
//! 4. [`pcr::PcrCalculator`] - put/call ratios and hedging posture
//! 5. [`regime::RegimeClassifier`] - volatility regime and level bands
//! 6. [`fragility::FragilityScorer`] - tiered systemic-fragility alert
//! 7. [`walls::WallLocator`] - open-interest walls and max pain
//! 8. [`signals::SignalGenerator`] - threshold-rule trading signals
//!
//! No calculator performs I/O, mutates its inputs, or calls back into an
//! earlier stage.

pub mod fragility;
pub mod iv;
pub mod iv_stats;
pub mod pcr;
pub mod pipeline;
pub mod regime;
pub mod signals;
pub mod skew;
pub mod walls;

pub use fragility::{FragilityConditions, FragilityResult, FragilityScorer, FragilityTier};
pub use iv::IvEstimator;
pub use iv_stats::{IvStatsCalculator, IvStatsResult};
pub use pcr::{HedgingPosture, PcrCalculator, PcrResult};
pub use pipeline::{ChainAnalyzer, ChainMetrics, MarketContext};
pub use regime::{RegimeClassifier, RegimeResult, VolatilityLevel, VolatilityRegime};
pub use signals::{Signal, SignalGenerator, SignalKind};
pub use skew::{DeltaSkew, SkewCalculator, SkewResult};
pub use walls::{Wall, WallLocator, WallsResult};
