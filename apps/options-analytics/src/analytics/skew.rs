//! Skew Calculator
//!
//! Builds a per-side IV curve over out-of-the-money strikes, samples it at
//! configured delta points, and derives net skew plus a normalized skew
//! index summarizing put/call IV asymmetry.
//!
//! Undefined is not zero: a side with fewer than two OTM strikes yields
//! `None` for that delta point so presentation layers can render "N/A"
//! instead of a misleading 0.00.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::chain::{OptionChainSnapshot, OptionContract};
use crate::domain::shared::Timestamp;

use super::iv::IvEstimator;

/// Neutral skew-index value, also the fallback on any degeneracy.
pub const SKEW_INDEX_NEUTRAL: f64 = 100.0;
/// Lower clamp for the skew index.
pub const SKEW_INDEX_MIN: f64 = 80.0;
/// Upper clamp for the skew index.
pub const SKEW_INDEX_MAX: f64 = 180.0;
/// Default delta points sampled on each side's curve.
pub const DEFAULT_DELTA_POINTS: [f64; 2] = [0.25, 0.10];

// ============================================================================
// IV Curve
// ============================================================================

/// A monotonic-strike IV curve with linear interpolation and extrapolation.
///
/// Requires at least two distinct strikes; duplicate strikes are averaged.
#[derive(Debug, Clone)]
struct IvCurve {
    strikes: Vec<f64>,
    ivs: Vec<f64>,
}

impl IvCurve {
    /// Build a curve from (strike, iv) points, or `None` when fewer than
    /// two distinct strikes remain.
    fn new(mut points: Vec<(f64, f64)>) -> Option<Self> {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        // Average duplicate strikes so segments never have zero width.
        let mut strikes: Vec<f64> = Vec::with_capacity(points.len());
        let mut ivs: Vec<f64> = Vec::with_capacity(points.len());
        for (strike, iv) in points {
            match strikes.last() {
                Some(last) if (strike - last).abs() < f64::EPSILON => {
                    let n = ivs.len();
                    ivs[n - 1] = (ivs[n - 1] + iv) / 2.0;
                }
                _ => {
                    strikes.push(strike);
                    ivs.push(iv);
                }
            }
        }

        if strikes.len() < 2 {
            return None;
        }
        Some(Self { strikes, ivs })
    }

    /// Read the IV at a strike, extrapolating beyond the curve's range
    /// using the boundary segment's slope.
    fn interpolate(&self, strike: f64) -> f64 {
        let n = self.strikes.len();
        let i = match self.strikes.iter().position(|s| *s >= strike) {
            Some(0) => 0,
            Some(i) => i - 1,
            None => n - 2,
        };

        let (x0, x1) = (self.strikes[i], self.strikes[i + 1]);
        let (y0, y1) = (self.ivs[i], self.ivs[i + 1]);
        let slope = (y1 - y0) / (x1 - x0);
        y0 + slope * (strike - x0)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Skew measured at one delta point, per side.
///
/// `None` means undefined (too few OTM strikes), which is distinct from a
/// computed zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaSkew {
    /// The delta target this point was sampled at (e.g. 0.25).
    pub delta_target: f64,
    /// Call-side skew: IV at `spot*(1+delta)` minus ATM IV.
    pub call: Option<f64>,
    /// Put-side skew: IV at `spot*(1-delta)` minus ATM IV.
    pub put: Option<f64>,
    /// Net skew, put minus call; `None` when either side is undefined.
    pub net: Option<f64>,
}

/// Output of the skew calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewResult {
    /// One entry per configured delta point, in configuration order.
    pub points: Vec<DeltaSkew>,
    /// Normalized put/call IV asymmetry, clamped to `[80, 180]`.
    pub skew_index: f64,
    /// Number of call contracts in the snapshot.
    pub num_calls: usize,
    /// Number of put contracts in the snapshot.
    pub num_puts: usize,
    /// Spot price the calculation used.
    pub spot_price: f64,
    /// When the result was computed.
    pub timestamp: Timestamp,
    /// True when any fallback or empty value was substituted.
    pub is_degraded: bool,
}

impl SkewResult {
    /// Net skew at the primary (first configured) delta point.
    #[must_use]
    pub fn primary_net_skew(&self) -> Option<f64> {
        self.points.first().and_then(|p| p.net)
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Skew calculator over a chain snapshot.
#[derive(Debug, Clone)]
pub struct SkewCalculator {
    estimator: IvEstimator,
    delta_points: Vec<f64>,
}

impl Default for SkewCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_DELTA_POINTS.to_vec())
    }
}

impl SkewCalculator {
    /// Create a calculator sampling the given delta points.
    #[must_use]
    pub const fn new(delta_points: Vec<f64>) -> Self {
        Self {
            estimator: IvEstimator::new(),
            delta_points,
        }
    }

    /// Compute skew metrics for a snapshot.
    ///
    /// Never fails: missing inputs degrade to `None`/defaults with
    /// `is_degraded` set.
    #[must_use]
    pub fn calculate(&self, snapshot: &OptionChainSnapshot) -> SkewResult {
        let spot = snapshot.spot_f64();
        let num_calls = snapshot.calls().count();
        let num_puts = snapshot.puts().count();

        if spot <= 0.0 || num_calls == 0 || num_puts == 0 {
            warn!(
                ticker = %snapshot.ticker,
                num_calls, num_puts, "insufficient chain data for skew; returning defaults"
            );
            return self.degraded_result(spot, num_calls, num_puts);
        }

        let calls: Vec<(f64, f64)> = snapshot
            .calls()
            .map(|c| (c.strike_f64(), self.estimator.resolve(c, spot)))
            .collect();
        let puts: Vec<(f64, f64)> = snapshot
            .puts()
            .map(|c| (c.strike_f64(), self.estimator.resolve(c, spot)))
            .collect();

        let otm_calls: Vec<(f64, f64)> =
            calls.iter().copied().filter(|(k, _)| *k > spot).collect();
        let otm_puts: Vec<(f64, f64)> = puts.iter().copied().filter(|(k, _)| *k < spot).collect();

        let call_curve = IvCurve::new(otm_calls.clone());
        let put_curve = IvCurve::new(otm_puts.clone());

        let mut degraded = false;
        let points: Vec<DeltaSkew> = self
            .delta_points
            .iter()
            .map(|&delta| {
                let call = call_curve
                    .as_ref()
                    .map(|c| c.interpolate(spot * (1.0 + delta)) - c.interpolate(spot));
                let put = put_curve
                    .as_ref()
                    .map(|c| c.interpolate(spot * (1.0 - delta)) - c.interpolate(spot));
                let net = match (put, call) {
                    (Some(p), Some(c)) => Some(p - c),
                    _ => {
                        degraded = true;
                        None
                    }
                };
                DeltaSkew {
                    delta_target: delta,
                    call,
                    put,
                    net,
                }
            })
            .collect();

        let skew_index = Self::skew_index(&otm_calls, &otm_puts, spot).unwrap_or_else(|| {
            degraded = true;
            SKEW_INDEX_NEUTRAL
        });

        SkewResult {
            points,
            skew_index,
            num_calls,
            num_puts,
            spot_price: spot,
            timestamp: Timestamp::now(),
            is_degraded: degraded,
        }
    }

    /// Resolve the IV for a single contract (provider value or estimate).
    #[must_use]
    pub fn resolve_iv(&self, contract: &OptionContract, spot: f64) -> f64 {
        self.estimator.resolve(contract, spot)
    }

    /// Scalar skew index: inverse-distance weighted OTM IV per side, then
    /// `100 + 100*ln(iv_put / iv_call)` clamped to `[80, 180]`.
    ///
    /// `None` on degeneracy (either OTM set empty, non-positive mean IV).
    fn skew_index(otm_calls: &[(f64, f64)], otm_puts: &[(f64, f64)], spot: f64) -> Option<f64> {
        let iv_call = Self::weighted_iv(otm_calls, spot)?;
        let iv_put = Self::weighted_iv(otm_puts, spot)?;
        if iv_call <= 0.0 || iv_put <= 0.0 {
            return None;
        }
        let index = SKEW_INDEX_NEUTRAL + 100.0 * (iv_put / iv_call).ln();
        Some(index.clamp(SKEW_INDEX_MIN, SKEW_INDEX_MAX))
    }

    /// Inverse-distance weighted mean IV: strikes closer to spot weigh more.
    fn weighted_iv(points: &[(f64, f64)], spot: f64) -> Option<f64> {
        if points.is_empty() {
            return None;
        }
        let mut weight_sum = 0.0;
        let mut weighted = 0.0;
        for &(strike, iv) in points {
            let distance = (strike - spot).abs().max(f64::EPSILON);
            let w = spot / distance;
            weight_sum += w;
            weighted += w * iv;
        }
        if weight_sum <= 0.0 {
            return None;
        }
        Some(weighted / weight_sum)
    }

    fn degraded_result(&self, spot: f64, num_calls: usize, num_puts: usize) -> SkewResult {
        SkewResult {
            points: self
                .delta_points
                .iter()
                .map(|&delta| DeltaSkew {
                    delta_target: delta,
                    call: None,
                    put: None,
                    net: None,
                })
                .collect(),
            skew_index: SKEW_INDEX_NEUTRAL,
            num_calls,
            num_puts,
            spot_price: spot,
            timestamp: Timestamp::now(),
            is_degraded: true,
        }
    }
}
