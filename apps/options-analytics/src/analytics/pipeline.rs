//! Chain Analysis Pipeline
//!
//! Runs every calculator over one snapshot in dependency order: skew, IV
//! statistics, PCR, regime, and walls are mutually independent; the
//! fragility scorer consumes their outputs. Each stage is a pure function of its inputs, so separate
//! snapshots can be analyzed in parallel with no shared state.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::domain::chain::{OptionChainSnapshot, VolatilityHistoryPoint};

use super::fragility::{FragilityResult, FragilityScorer};
use super::iv_stats::{IvStatsCalculator, IvStatsResult};
use super::pcr::{PcrCalculator, PcrResult};
use super::regime::{RegimeClassifier, RegimeResult};
use super::skew::{SkewCalculator, SkewResult};
use super::walls::{WallLocator, WallsResult};

/// Externally fetched market values passed into the pipeline.
///
/// Any fetch (volatility index, market return, sentiment) happens before
/// the pipeline runs; the engine itself performs no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketContext {
    /// Volatility-index history window, when the caller has one.
    pub volatility_history: Option<VolatilityHistoryPoint>,
    /// Daily market return in percent.
    pub market_return: Option<f64>,
    /// Sentiment score in [-1, 1]; 0 when unavailable.
    pub sentiment_score: f64,
}

/// All per-snapshot metric results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainMetrics {
    /// Skew curve metrics.
    pub skew: SkewResult,
    /// Provider-IV summary statistics.
    pub iv_stats: IvStatsResult,
    /// Put/call ratio metrics.
    pub pcr: PcrResult,
    /// Volatility regime; `None` when no history was supplied.
    pub regime: Option<RegimeResult>,
    /// Systemic fragility tier.
    pub fragility: FragilityResult,
    /// Option walls and max pain.
    pub walls: WallsResult,
}

impl ChainMetrics {
    /// Whether any stage substituted fallback values.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.skew.is_degraded
            || self.iv_stats.is_degraded
            || self.pcr.is_degraded
            || self.fragility.is_degraded
            || self.walls.is_degraded
    }
}

/// Stateless analyzer running the full calculator pipeline.
#[derive(Debug, Clone)]
pub struct ChainAnalyzer {
    skew: SkewCalculator,
    iv_stats: IvStatsCalculator,
    pcr: PcrCalculator,
    regime: RegimeClassifier,
    fragility: FragilityScorer,
    walls: WallLocator,
    min_wall_open_interest: u64,
}

impl Default for ChainAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}

impl ChainAnalyzer {
    /// Create an analyzer from configuration.
    #[must_use]
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            skew: SkewCalculator::new(config.delta_points.clone()),
            iv_stats: IvStatsCalculator::new(),
            pcr: PcrCalculator::new(),
            regime: RegimeClassifier::new(),
            fragility: FragilityScorer::new(),
            walls: WallLocator::new(),
            min_wall_open_interest: config.min_wall_open_interest,
        }
    }

    /// Analyze one snapshot.
    ///
    /// Never fails: degraded inputs produce degraded results.
    #[must_use]
    pub fn analyze(&self, snapshot: &OptionChainSnapshot, market: &MarketContext) -> ChainMetrics {
        debug!(
            ticker = %snapshot.ticker,
            expiration = %snapshot.expiration,
            contracts = snapshot.contracts.len(),
            "analyzing chain snapshot"
        );

        let skew = self.skew.calculate(snapshot);
        let iv_stats = self.iv_stats.calculate(snapshot);
        let pcr = self.pcr.calculate(snapshot);
        let walls = self.walls.locate(snapshot, self.min_wall_open_interest);
        let regime = market
            .volatility_history
            .zip(market.market_return)
            .map(|(history, market_return)| self.regime.classify(&history, market_return));
        let fragility =
            self.fragility
                .score_results(&pcr, &skew, regime.as_ref(), market.market_return);

        ChainMetrics {
            skew,
            iv_stats,
            pcr,
            regime,
            fragility,
            walls,
        }
    }

    /// Analyze independent snapshots in parallel.
    ///
    /// Safe because every stage is pure over immutable inputs.
    #[must_use]
    pub fn analyze_batch(
        &self,
        snapshots: &[OptionChainSnapshot],
        market: &MarketContext,
    ) -> Vec<ChainMetrics> {
        snapshots
            .par_iter()
            .map(|snapshot| self.analyze(snapshot, market))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fragility::FragilityTier;
    use crate::analytics::regime::VolatilityRegime;
    use crate::domain::chain::{OptionContract, OptionSide};
    use crate::domain::shared::Symbol;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn contract(
        strike: Decimal,
        side: OptionSide,
        volume: u64,
        oi: u64,
        iv: f64,
    ) -> OptionContract {
        OptionContract::new(strike, side, dec!(1.00), dec!(1.20), volume, oi)
            .with_implied_volatility(iv)
    }

    fn snapshot(ticker: &str) -> OptionChainSnapshot {
        OptionChainSnapshot::new(
            Symbol::new(ticker),
            NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            dec!(100),
            vec![
                contract(dec!(105), OptionSide::Call, 100, 400, 0.20),
                contract(dec!(110), OptionSide::Call, 50, 800, 0.22),
                contract(dec!(95), OptionSide::Put, 200, 900, 0.26),
                contract(dec!(90), OptionSide::Put, 100, 600, 0.30),
            ],
        )
    }

    #[test]
    fn test_full_pipeline_runs_every_stage() {
        let market = MarketContext {
            volatility_history: Some(VolatilityHistoryPoint::new(24.0, 20.0, 19.0)),
            market_return: Some(-1.5),
            sentiment_score: 0.0,
        };
        let metrics = ChainAnalyzer::default().analyze(&snapshot("SPY"), &market);

        assert_eq!(metrics.skew.num_calls, 2);
        assert_eq!(metrics.skew.num_puts, 2);
        assert_eq!(metrics.iv_stats.num_with_iv, 4);
        assert!(metrics.iv_stats.mean.is_some());
        assert!((metrics.pcr.pcr_oi - 1500.0 / 1200.0).abs() < 1e-9);
        assert_eq!(metrics.regime.unwrap().regime, VolatilityRegime::Panic);
        assert!(metrics.walls.max_pain > 0.0);
        // Broadly hedged chain: fragility stays low even in panic.
        assert_eq!(metrics.fragility.tier, FragilityTier::Low);
    }

    #[test]
    fn test_missing_history_skips_regime() {
        let metrics = ChainAnalyzer::default().analyze(&snapshot("SPY"), &MarketContext::default());
        assert!(metrics.regime.is_none());
        assert!(!metrics.is_degraded());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let analyzer = ChainAnalyzer::default();
        let market = MarketContext::default();
        let snapshots = vec![snapshot("SPY"), snapshot("QQQ"), snapshot("IWM")];

        let batch = analyzer.analyze_batch(&snapshots, &market);
        assert_eq!(batch.len(), 3);
        for (snapshot, metrics) in snapshots.iter().zip(&batch) {
            let sequential = analyzer.analyze(snapshot, &market);
            assert_eq!(metrics.pcr.pcr_volume, sequential.pcr.pcr_volume);
            assert_eq!(metrics.skew.skew_index, sequential.skew.skew_index);
            assert_eq!(metrics.walls.max_pain, sequential.walls.max_pain);
        }
    }

    #[test]
    fn test_empty_snapshot_degrades_without_error() {
        let empty = OptionChainSnapshot::new(
            Symbol::new("SPY"),
            NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            dec!(100),
            vec![],
        );
        let metrics = ChainAnalyzer::default().analyze(&empty, &MarketContext::default());
        assert!(metrics.is_degraded());
        assert_eq!(metrics.fragility.tier, FragilityTier::Low);
    }
}
