//! Implied Volatility Estimator
//!
//! Approximates per-contract implied volatility from mid-price and moneyness
//! when a provider-supplied IV is absent or untrusted.
//!
//! This is an engineered heuristic, **not** a Black-Scholes inversion: the
//! seed `mid / (spot * 0.15)` and the asymmetric moneyness adjustments are
//! behavioral constants carried over for parity with the upstream metric
//! store. Do not retune them without product sign-off.

use crate::domain::chain::OptionContract;

/// Lower clamp for estimated IV.
pub const IV_FLOOR: f64 = 0.05;
/// Upper clamp for estimated IV.
pub const IV_CAP: f64 = 1.0;
/// Flat fallback when the contract has no usable mid price.
pub const FALLBACK_IV: f64 = 0.2;
/// Price scale in the seed `mid / (spot * PRICE_SCALE)`.
pub const PRICE_SCALE: f64 = 0.15;
/// Upside (OTM call region) moneyness adjustment slope.
const UPSIDE_SLOPE: f64 = 0.5;
/// Downside moneyness adjustment slope.
const DOWNSIDE_SLOPE: f64 = 0.3;

/// Heuristic implied-volatility estimator.
///
/// Deterministic and total: always returns a finite value in
/// `[IV_FLOOR, IV_CAP]` (or `FALLBACK_IV` for unpriced contracts), with no
/// failure mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct IvEstimator;

impl IvEstimator {
    /// Create a new estimator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Estimate implied volatility for a contract at the given spot price.
    #[must_use]
    pub fn estimate(&self, contract: &OptionContract, spot: f64) -> f64 {
        let mid = contract.mid_f64();
        if mid <= 0.0 || spot <= 0.0 {
            return FALLBACK_IV;
        }

        let moneyness = contract.moneyness(spot);
        let mut iv = mid / (spot * PRICE_SCALE);

        // Asymmetric adjustment: upside strikes scale up, downside scale down.
        if moneyness > 1.0 {
            iv *= 1.0 + UPSIDE_SLOPE * (moneyness - 1.0);
        } else {
            iv *= 1.0 - DOWNSIDE_SLOPE * (1.0 - moneyness);
        }

        iv.clamp(IV_FLOOR, IV_CAP)
    }

    /// The contract's IV: provider-supplied when present, estimated otherwise.
    #[must_use]
    pub fn resolve(&self, contract: &OptionContract, spot: f64) -> f64 {
        contract
            .implied_volatility
            .filter(|iv| iv.is_finite() && *iv > 0.0)
            .unwrap_or_else(|| self.estimate(contract, spot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::OptionSide;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn contract(strike: Decimal, bid: Decimal, ask: Decimal) -> OptionContract {
        OptionContract::new(strike, OptionSide::Call, bid, ask, 10, 100)
    }

    #[test]
    fn test_zero_mid_returns_fallback() {
        let c = contract(dec!(100), dec!(0), dec!(0));
        let iv = IvEstimator::new().estimate(&c, 100.0);
        assert!((iv - FALLBACK_IV).abs() < 1e-12);
    }

    #[test]
    fn test_atm_seed() {
        // mid = 3.0, spot = 100 -> seed 3 / 15 = 0.2, moneyness == 1 so only
        // the downside branch applies with zero adjustment.
        let c = contract(dec!(100), dec!(2.90), dec!(3.10));
        let iv = IvEstimator::new().estimate(&c, 100.0);
        assert!((iv - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_otm_call_scales_up() {
        // moneyness 1.10 -> seed * (1 + 0.5 * 0.10) = seed * 1.05
        let c = contract(dec!(110), dec!(2.90), dec!(3.10));
        let iv = IvEstimator::new().estimate(&c, 100.0);
        assert!((iv - 0.2 * 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_downside_scales_down() {
        // moneyness 0.90 -> seed * (1 - 0.3 * 0.10) = seed * 0.97
        let c = contract(dec!(90), dec!(2.90), dec!(3.10));
        let iv = IvEstimator::new().estimate(&c, 100.0);
        assert!((iv - 0.2 * 0.97).abs() < 1e-9);
    }

    #[test]
    fn test_expensive_contract_hits_cap() {
        let c = contract(dec!(100), dec!(40), dec!(42));
        let iv = IvEstimator::new().estimate(&c, 100.0);
        assert!((iv - IV_CAP).abs() < 1e-12);
    }

    #[test]
    fn test_cheap_contract_hits_floor() {
        let c = contract(dec!(50), dec!(0.01), dec!(0.02));
        let iv = IvEstimator::new().estimate(&c, 100.0);
        assert!((iv - IV_FLOOR).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_prefers_provider_iv() {
        let c = contract(dec!(100), dec!(2.90), dec!(3.10)).with_implied_volatility(0.42);
        let iv = IvEstimator::new().resolve(&c, 100.0);
        assert!((iv - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_rejects_nonpositive_provider_iv() {
        let c = contract(dec!(100), dec!(2.90), dec!(3.10)).with_implied_volatility(0.0);
        let iv = IvEstimator::new().resolve(&c, 100.0);
        assert!((iv - 0.2).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_estimate_always_in_range(
            strike in 1.0_f64..1000.0,
            mid in 0.0_f64..200.0,
            spot in 1.0_f64..1000.0,
        ) {
            let half = Decimal::from_f64_retain(mid).unwrap_or(Decimal::ZERO);
            let strike = Decimal::from_f64_retain(strike).unwrap_or(Decimal::ONE);
            let c = OptionContract::new(strike, OptionSide::Call, half, half, 0, 0);
            let iv = IvEstimator::new().estimate(&c, spot);
            prop_assert!(iv.is_finite());
            prop_assert!((IV_FLOOR..=IV_CAP).contains(&iv) || (iv - FALLBACK_IV).abs() < 1e-12);
        }
    }
}
