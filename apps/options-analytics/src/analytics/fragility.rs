//! Systemic Fragility Scorer
//!
//! Combines the PCR, skew, and volatility-regime outputs with the daily
//! market return into a tiered alert. The tiering is a fixed AND/OR decision
//! table, not a learned model.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::shared::Timestamp;

use super::pcr::{HedgingPosture, PcrResult};
use super::regime::{MARKET_SOFT_DECLINE, RegimeResult};
use super::signals::SKEW_ALERT_THRESHOLD;
use super::skew::SkewResult;

/// Systemic fragility tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FragilityTier {
    /// No fragility condition active.
    Low,
    /// Aggregate protection is thin (OI ratio below 0.9).
    High,
    /// Thin protection plus elevated skew, spiking volatility, and a
    /// declining market, all at once.
    Critical,
}

impl FragilityTier {
    /// Fixed recommended actions for the tier.
    #[must_use]
    pub const fn recommended_actions(&self) -> &'static [&'static str] {
        match self {
            Self::Low => &["monitoraggio ordinario"],
            Self::High => &[
                "verificare la copertura del portafoglio",
                "ridurre le posizioni a leva",
            ],
            Self::Critical => &[
                "ridurre l'esposizione direzionale",
                "acquistare protezione put",
                "sospendere nuove aperture",
            ],
        }
    }
}

/// The four boolean sub-conditions feeding the tier decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragilityConditions {
    /// OI ratio below the 0.9 fragility threshold.
    pub pcr_fragility: bool,
    /// Net skew above the 0.02 alert threshold.
    pub skew_elevated: bool,
    /// Volatility jumping into a falling market.
    pub volatility_spiking: bool,
    /// Daily market return below -0.5%.
    pub market_decline: bool,
}

/// Output of the fragility scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragilityResult {
    /// Tier per the decision table.
    pub tier: FragilityTier,
    /// The sub-conditions the tier was derived from.
    pub conditions: FragilityConditions,
    /// Fixed recommended actions for the tier.
    pub recommended_actions: Vec<String>,
    /// When the result was computed.
    pub timestamp: Timestamp,
    /// True when upstream results were degraded and the tier defaulted low.
    pub is_degraded: bool,
}

/// Systemic fragility scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragilityScorer;

impl FragilityScorer {
    /// Create a new scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Score explicit sub-conditions.
    ///
    /// All four true -> CRITICAL; PCR fragility alone -> HIGH; else LOW.
    #[must_use]
    pub fn score(&self, conditions: FragilityConditions) -> FragilityResult {
        let tier = if conditions.pcr_fragility
            && conditions.skew_elevated
            && conditions.volatility_spiking
            && conditions.market_decline
        {
            FragilityTier::Critical
        } else if conditions.pcr_fragility {
            FragilityTier::High
        } else {
            FragilityTier::Low
        };

        Self::result(tier, conditions, false)
    }

    /// Derive the sub-conditions from upstream results and score them.
    ///
    /// The tier reads only the open-interest ratio; a zero volume
    /// denominator does not affect it. When the OI ratio itself could not be
    /// computed (no call open interest) the tier defaults to LOW with
    /// `is_degraded` set.
    #[must_use]
    pub fn score_results(
        &self,
        pcr: &PcrResult,
        skew: &SkewResult,
        regime: Option<&RegimeResult>,
        market_return: Option<f64>,
    ) -> FragilityResult {
        if pcr.hedging_posture == HedgingPosture::Unknown {
            warn!("OI ratio unavailable; fragility tier defaults to LOW");
            let conditions = FragilityConditions {
                pcr_fragility: false,
                skew_elevated: false,
                volatility_spiking: false,
                market_decline: false,
            };
            return Self::result(FragilityTier::Low, conditions, true);
        }

        let conditions = FragilityConditions {
            pcr_fragility: pcr.fragility_alert,
            skew_elevated: skew
                .primary_net_skew()
                .is_some_and(|s| s > SKEW_ALERT_THRESHOLD),
            volatility_spiking: regime.is_some_and(|r| r.is_spiking),
            market_decline: market_return.is_some_and(|r| r < MARKET_SOFT_DECLINE),
        };
        self.score(conditions)
    }

    fn result(
        tier: FragilityTier,
        conditions: FragilityConditions,
        is_degraded: bool,
    ) -> FragilityResult {
        FragilityResult {
            tier,
            conditions,
            recommended_actions: tier
                .recommended_actions()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            timestamp: Timestamp::now(),
            is_degraded,
        }
    }
}
