//! Volatility Regime Classifier
//!
//! Classifies the current volatility-index reading against the daily market
//! return into a discrete regime, plus an independent level-only
//! classification. Both are re-derived from the inputs on every call; there
//! is no persistent state machine.

use serde::{Deserialize, Serialize};

use crate::domain::chain::VolatilityHistoryPoint;
use crate::domain::shared::Timestamp;

/// Market-return threshold (%) marking a clear decline.
pub const MARKET_DECLINE: f64 = -1.0;
/// Market-return threshold (%) marking a mild decline.
pub const MARKET_SOFT_DECLINE: f64 = -0.5;
/// Volatility delta above which a decline escalates to panic.
pub const VOL_DELTA_PANIC: f64 = 3.0;
/// Volatility delta above which caution or unexpected fear is flagged.
pub const VOL_DELTA_ELEVATED: f64 = 2.0;

/// Discrete regime derived from market return and volatility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRegime {
    /// Sharp decline with a volatility spike above +3.0.
    Panic,
    /// Sharp decline with rising volatility.
    Fear,
    /// Sharp decline while volatility is flat or falling.
    Divergence,
    /// Mild decline with an elevated volatility jump.
    Caution,
    /// Mild decline without an elevated jump.
    Normal,
    /// Volatility jumping while the market holds up.
    UnexpectedFear,
    /// Nothing notable.
    Calm,
}

/// Independent classification of the raw volatility-index level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityLevel {
    /// Index below 15.
    Complacency,
    /// Index below 20.
    Normal,
    /// Index below 25.
    Cautious,
    /// Index below 30.
    Fear,
    /// Index at or above 30.
    Panic,
}

impl VolatilityLevel {
    /// Map a raw index level into a band.
    #[must_use]
    pub fn from_index(level: f64) -> Self {
        if level < 15.0 {
            Self::Complacency
        } else if level < 20.0 {
            Self::Normal
        } else if level < 25.0 {
            Self::Cautious
        } else if level < 30.0 {
            Self::Fear
        } else {
            Self::Panic
        }
    }
}

/// Output of the regime classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeResult {
    /// Regime from the return/delta decision table.
    pub regime: VolatilityRegime,
    /// Independent level-only classification.
    pub level: VolatilityLevel,
    /// Raw volatility-index reading used.
    pub index_level: f64,
    /// Session-over-session index change.
    pub delta: f64,
    /// Week-over-week index change.
    pub weekly_delta: f64,
    /// Daily market return (%) used.
    pub market_return: f64,
    /// True when volatility is jumping into a falling market.
    pub is_spiking: bool,
    /// When the result was computed.
    pub timestamp: Timestamp,
}

/// Volatility regime classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegimeClassifier;

impl RegimeClassifier {
    /// Create a new classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify the current reading.
    ///
    /// `market_return` is the daily market return in percent (e.g. -1.5 for
    /// a 1.5% decline).
    #[must_use]
    pub fn classify(&self, history: &VolatilityHistoryPoint, market_return: f64) -> RegimeResult {
        let delta = history.delta();

        // Ordered decision table; first match wins.
        let regime = if market_return < MARKET_DECLINE {
            if delta > VOL_DELTA_PANIC {
                VolatilityRegime::Panic
            } else if delta > 0.0 {
                VolatilityRegime::Fear
            } else {
                VolatilityRegime::Divergence
            }
        } else if market_return <= MARKET_SOFT_DECLINE {
            if delta > VOL_DELTA_ELEVATED {
                VolatilityRegime::Caution
            } else {
                VolatilityRegime::Normal
            }
        } else if delta > VOL_DELTA_ELEVATED {
            VolatilityRegime::UnexpectedFear
        } else {
            VolatilityRegime::Calm
        };

        RegimeResult {
            regime,
            level: VolatilityLevel::from_index(history.current),
            index_level: history.current,
            delta,
            weekly_delta: history.weekly_delta(),
            market_return,
            is_spiking: delta > VOL_DELTA_ELEVATED && market_return < MARKET_SOFT_DECLINE,
            timestamp: Timestamp::now(),
        }
    }
}
