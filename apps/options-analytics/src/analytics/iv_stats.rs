//! Implied Volatility Summary Statistics
//!
//! Descriptive statistics over the provider-supplied IVs of a snapshot:
//! mean, sample standard deviation, min, and max, plus contract counts.
//! Estimated IVs are deliberately excluded; the statistics describe what
//! the provider quoted, not what the heuristic filled in.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::chain::OptionChainSnapshot;
use crate::domain::shared::Timestamp;

/// Output of the IV statistics calculator.
///
/// Statistics are `None` when no contract carries a usable provider IV;
/// `std_dev` additionally needs at least two observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvStatsResult {
    /// Mean provider IV.
    pub mean: Option<f64>,
    /// Sample standard deviation of provider IVs.
    pub std_dev: Option<f64>,
    /// Lowest provider IV.
    pub min: Option<f64>,
    /// Highest provider IV.
    pub max: Option<f64>,
    /// Total contracts in the snapshot, both sides.
    pub num_contracts: usize,
    /// Contracts carrying a usable provider IV.
    pub num_with_iv: usize,
    /// Spot price the calculation used.
    pub spot_price: f64,
    /// When the result was computed.
    pub timestamp: Timestamp,
    /// True when no provider IV was available.
    pub is_degraded: bool,
}

/// IV summary statistics calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct IvStatsCalculator;

impl IvStatsCalculator {
    /// Create a new calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute IV statistics for a snapshot.
    ///
    /// Never fails: a snapshot without provider IVs yields `None` statistics
    /// with `is_degraded` set.
    #[must_use]
    pub fn calculate(&self, snapshot: &OptionChainSnapshot) -> IvStatsResult {
        let ivs: Vec<f64> = snapshot
            .contracts
            .iter()
            .filter_map(|c| c.implied_volatility)
            .filter(|iv| iv.is_finite() && *iv > 0.0)
            .collect();

        if ivs.is_empty() {
            if !snapshot.contracts.is_empty() {
                warn!(
                    ticker = %snapshot.ticker,
                    contracts = snapshot.contracts.len(),
                    "no provider IVs in snapshot; statistics undefined"
                );
            }
            return IvStatsResult {
                mean: None,
                std_dev: None,
                min: None,
                max: None,
                num_contracts: snapshot.contracts.len(),
                num_with_iv: 0,
                spot_price: snapshot.spot_f64(),
                timestamp: Timestamp::now(),
                is_degraded: true,
            };
        }

        let n = ivs.len() as f64;
        let mean = ivs.iter().sum::<f64>() / n;
        // Sample standard deviation; undefined for a single observation.
        let std_dev = if ivs.len() > 1 {
            let variance = ivs.iter().map(|iv| (iv - mean).powi(2)).sum::<f64>() / (n - 1.0);
            Some(variance.sqrt())
        } else {
            None
        };
        let min = ivs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ivs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        IvStatsResult {
            mean: Some(mean),
            std_dev,
            min: Some(min),
            max: Some(max),
            num_contracts: snapshot.contracts.len(),
            num_with_iv: ivs.len(),
            spot_price: snapshot.spot_f64(),
            timestamp: Timestamp::now(),
            is_degraded: false,
        }
    }
}
