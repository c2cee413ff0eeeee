//! Put/Call Ratio Calculator
//!
//! Aggregates volume and open interest across the two sides of the chain
//! into ratios, an alert flag, and a hedging-posture classification.
//!
//! The threshold values here are contractual constants shared with the
//! persisted metric store, not tuning defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::chain::OptionChainSnapshot;
use crate::domain::shared::Timestamp;

/// Volume-PCR level above which a hedging alert is raised.
pub const PCR_VOLUME_ALERT: f64 = 1.5;
/// OI-PCR level below which systemic protection is considered insufficient.
pub const PCR_OI_FRAGILITY: f64 = 0.9;
/// OI-PCR level at or above which hedging is broadly present.
pub const PCR_OI_HEDGED: f64 = 1.0;

/// Aggregate hedging posture read from the open-interest ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HedgingPosture {
    /// `pcr_oi >= 1.0`: hedging broadly present across the chain.
    BroadlyHedged,
    /// `0.9 <= pcr_oi < 1.0`: some hedging, but limited.
    LimitedHedging,
    /// `pcr_oi < 0.9`: insufficient aggregate protection in the system.
    Fragile,
    /// The ratio could not be computed (no call open interest).
    Unknown,
}

impl HedgingPosture {
    /// Classify an OI ratio. `None` when the denominator was zero.
    #[must_use]
    pub fn classify(pcr_oi: Option<f64>) -> Self {
        match pcr_oi {
            Some(r) if r >= PCR_OI_HEDGED => Self::BroadlyHedged,
            Some(r) if r >= PCR_OI_FRAGILITY => Self::LimitedHedging,
            Some(_) => Self::Fragile,
            None => Self::Unknown,
        }
    }

    /// Human-readable description, kept verbatim from the metric store.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::BroadlyHedged => "hedging diffuso presente",
            Self::LimitedHedging => "copertura limitata",
            Self::Fragile => "copertura insufficiente: fragilita' sistemica",
            Self::Unknown => "open interest insufficiente per il calcolo",
        }
    }
}

/// Output of the put/call ratio calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcrResult {
    /// Total put volume.
    pub put_volume: u64,
    /// Total call volume.
    pub call_volume: u64,
    /// Total put open interest.
    pub put_oi: u64,
    /// Total call open interest.
    pub call_oi: u64,
    /// Put/call volume ratio; 0 when call volume is 0.
    pub pcr_volume: f64,
    /// Put/call open-interest ratio; 0 when call OI is 0.
    pub pcr_oi: f64,
    /// True when `pcr_volume` exceeds the alert threshold (1.5).
    pub above_alert: bool,
    /// True when computed `pcr_oi` is below the fragility threshold (0.9).
    pub fragility_alert: bool,
    /// Hedging posture read from the OI ratio.
    pub hedging_posture: HedgingPosture,
    /// When the result was computed.
    pub timestamp: Timestamp,
    /// True when a denominator was zero or a side was empty.
    pub is_degraded: bool,
}

/// Put/call ratio calculator.
///
/// The canonical input is the chain snapshot; [`PcrCalculator::from_totals`]
/// adapts legacy pre-aggregated inputs to the same result shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcrCalculator;

impl PcrCalculator {
    /// Create a new calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute ratios from a snapshot.
    #[must_use]
    pub fn calculate(&self, snapshot: &OptionChainSnapshot) -> PcrResult {
        let call_volume: u64 = snapshot.calls().map(|c| c.volume).sum();
        let put_volume: u64 = snapshot.puts().map(|c| c.volume).sum();
        let call_oi: u64 = snapshot.calls().map(|c| c.open_interest).sum();
        let put_oi: u64 = snapshot.puts().map(|c| c.open_interest).sum();

        let result = self.from_totals(call_volume, put_volume, call_oi, put_oi);
        if result.is_degraded {
            warn!(
                ticker = %snapshot.ticker,
                call_volume, call_oi, "zero call-side denominator; PCR degraded to 0"
            );
        }
        result
    }

    /// Adapter for legacy aggregate-map inputs: side totals instead of a
    /// snapshot.
    #[must_use]
    pub fn from_totals(
        &self,
        call_volume: u64,
        put_volume: u64,
        call_oi: u64,
        put_oi: u64,
    ) -> PcrResult {
        let pcr_volume = if call_volume > 0 {
            put_volume as f64 / call_volume as f64
        } else {
            0.0
        };
        let oi_ratio = if call_oi > 0 {
            Some(put_oi as f64 / call_oi as f64)
        } else {
            None
        };

        let hedging_posture = HedgingPosture::classify(oi_ratio);
        PcrResult {
            put_volume,
            call_volume,
            put_oi,
            call_oi,
            pcr_volume,
            pcr_oi: oi_ratio.unwrap_or(0.0),
            above_alert: pcr_volume > PCR_VOLUME_ALERT,
            // A zero denominator means unknown, not fragile.
            fragility_alert: hedging_posture == HedgingPosture::Fragile,
            hedging_posture,
            timestamp: Timestamp::now(),
            is_degraded: call_volume == 0 || call_oi == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::{OptionContract, OptionSide};
    use crate::domain::shared::Symbol;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn contract(side: OptionSide, volume: u64, oi: u64) -> OptionContract {
        OptionContract::new(dec!(100), side, dec!(1.00), dec!(1.10), volume, oi)
    }

    fn snapshot(contracts: Vec<OptionContract>) -> OptionChainSnapshot {
        OptionChainSnapshot::new(
            Symbol::new("SPY"),
            NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            dec!(100),
            contracts,
        )
    }

    /// Spec scenario: put OI 530 vs call OI 350 -> broad hedging, no alert.
    #[test]
    fn test_hedging_broadly_present() {
        let snap = snapshot(vec![
            contract(OptionSide::Call, 10, 100),
            contract(OptionSide::Call, 10, 200),
            contract(OptionSide::Call, 10, 50),
            contract(OptionSide::Put, 10, 300),
            contract(OptionSide::Put, 10, 150),
            contract(OptionSide::Put, 10, 80),
        ]);
        let result = PcrCalculator::new().calculate(&snap);

        assert!((result.pcr_oi - 530.0 / 350.0).abs() < 1e-9);
        assert!(result.pcr_oi > 1.5);
        assert!(!result.fragility_alert);
        assert_eq!(result.hedging_posture, HedgingPosture::BroadlyHedged);
        assert_eq!(result.hedging_posture.message(), "hedging diffuso presente");
        assert!(!result.is_degraded);
    }

    /// Spec scenario: put OI 530 vs call OI 1200 -> fragility alert.
    #[test]
    fn test_fragility_alert_fires_below_threshold() {
        let result = PcrCalculator::new().from_totals(30, 30, 1200, 530);

        assert!((result.pcr_oi - 530.0 / 1200.0).abs() < 1e-9);
        assert!(result.pcr_oi < PCR_OI_FRAGILITY);
        assert!(result.fragility_alert);
        assert_eq!(result.hedging_posture, HedgingPosture::Fragile);
    }

    #[test]
    fn test_limited_hedging_band() {
        let result = PcrCalculator::new().from_totals(100, 100, 1000, 950);
        assert!((result.pcr_oi - 0.95).abs() < 1e-12);
        assert!(!result.fragility_alert);
        assert_eq!(result.hedging_posture, HedgingPosture::LimitedHedging);
    }

    #[test]
    fn test_zero_call_volume_yields_zero_ratio() {
        let snap = snapshot(vec![
            contract(OptionSide::Call, 0, 100),
            contract(OptionSide::Put, 50, 100),
        ]);
        let result = PcrCalculator::new().calculate(&snap);

        assert!((result.pcr_volume - 0.0).abs() < f64::EPSILON);
        assert!(!result.above_alert);
        assert!(result.is_degraded);
    }

    #[test]
    fn test_zero_call_oi_is_unknown_not_fragile() {
        let result = PcrCalculator::new().from_totals(10, 10, 0, 500);
        assert!((result.pcr_oi - 0.0).abs() < f64::EPSILON);
        assert!(!result.fragility_alert);
        assert_eq!(result.hedging_posture, HedgingPosture::Unknown);
        assert!(result.is_degraded);
    }

    #[test]
    fn test_volume_alert_threshold() {
        let below = PcrCalculator::new().from_totals(100, 150, 100, 100);
        assert!(!below.above_alert);

        let above = PcrCalculator::new().from_totals(100, 151, 100, 100);
        assert!(above.above_alert);
    }

    #[test]
    fn test_empty_snapshot_degrades() {
        let result = PcrCalculator::new().calculate(&snapshot(vec![]));
        assert!(result.is_degraded);
        assert!((result.pcr_volume - 0.0).abs() < f64::EPSILON);
        assert!((result.pcr_oi - 0.0).abs() < f64::EPSILON);
    }
}
