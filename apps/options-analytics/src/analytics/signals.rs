//! Signal Generator
//!
//! Applies fixed threshold rules to the skew and PCR results plus an
//! externally supplied sentiment score, emitting discrete trading signals.
//! All rules are evaluated on every call and are order-independent; absent
//! or zero inputs simply produce fewer signals.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::shared::{Symbol, Timestamp};

use super::pcr::PcrResult;
use super::skew::SkewResult;

/// Net skew level above which a skew signal fires.
pub const SKEW_ALERT_THRESHOLD: f64 = 0.02;
/// Volume-PCR level above which a PCR signal fires.
pub const PCR_SIGNAL_THRESHOLD: f64 = 1.5;
/// Absolute sentiment score above which a sentiment signal fires.
pub const SENTIMENT_EXTREME_THRESHOLD: f64 = 0.5;
/// Strength cap for skew signals.
pub const SKEW_STRENGTH_CAP: f64 = 8.0;
/// Strength cap for PCR signals.
pub const PCR_STRENGTH_CAP: f64 = 9.0;
/// Strength cap for sentiment signals.
pub const SENTIMENT_STRENGTH_CAP: f64 = 7.0;
/// Fixed strength of the combined alert.
pub const COMBINED_ALERT_STRENGTH: f64 = 8.0;
/// Upper bound on trailing signals kept for the caller.
pub const SIGNAL_HISTORY_LIMIT: usize = 50;

/// Kind of emitted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    /// Net skew above the alert threshold.
    SkewHigh,
    /// Volume PCR above the alert threshold.
    PcrHigh,
    /// Sentiment score beyond the extreme threshold.
    SentimentExtreme,
    /// Two or more signals fired in the same call.
    CombinedAlert,
}

/// A discrete trading signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Underlying the signal refers to.
    pub ticker: Symbol,
    /// What rule fired.
    pub kind: SignalKind,
    /// Free-form direction label (e.g. "bearish_alert").
    pub direction: String,
    /// Signal strength, clamped to a per-kind upper bound.
    pub strength: f64,
    /// Human-readable reason embedding the triggering value.
    pub reason: String,
    /// When the signal was emitted.
    pub timestamp: Timestamp,
}

/// Threshold-rule signal generator with a bounded trailing buffer.
///
/// The buffer exists for the caller's convenience only; no calculation
/// reads it. When shared across a scheduler's repeated invocations it
/// should sit behind a single exclusive lock.
#[derive(Debug)]
pub struct SignalGenerator {
    recent: VecDeque<Signal>,
    history_limit: usize,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalGenerator {
    /// Create a new generator keeping the full trailing history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(SIGNAL_HISTORY_LIMIT)
    }

    /// Create a generator keeping at most `limit` trailing signals,
    /// clamped to `1..=SIGNAL_HISTORY_LIMIT`.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        let history_limit = limit.clamp(1, SIGNAL_HISTORY_LIMIT);
        Self {
            recent: VecDeque::with_capacity(history_limit),
            history_limit,
        }
    }

    /// Evaluate every rule against the inputs and return the signals that
    /// fired. Never errors.
    pub fn generate(
        &mut self,
        ticker: &Symbol,
        skew: &SkewResult,
        pcr: &PcrResult,
        sentiment_score: f64,
    ) -> Vec<Signal> {
        let now = Timestamp::now();
        let mut signals = Vec::new();

        if let Some(net_skew) = skew.primary_net_skew() {
            if net_skew > SKEW_ALERT_THRESHOLD {
                signals.push(Signal {
                    ticker: ticker.clone(),
                    kind: SignalKind::SkewHigh,
                    direction: "bearish_alert".to_string(),
                    strength: (net_skew * 100.0).min(SKEW_STRENGTH_CAP),
                    reason: format!("Skew elevato: {net_skew:.3}"),
                    timestamp: now,
                });
            }
        }

        if pcr.pcr_volume > PCR_SIGNAL_THRESHOLD {
            signals.push(Signal {
                ticker: ticker.clone(),
                kind: SignalKind::PcrHigh,
                direction: "hedge_recommended".to_string(),
                strength: pcr.pcr_volume.min(PCR_STRENGTH_CAP),
                reason: format!("PCR elevato: {:.2}", pcr.pcr_volume),
                timestamp: now,
            });
        }

        if sentiment_score.abs() > SENTIMENT_EXTREME_THRESHOLD {
            let label = if sentiment_score < 0.0 {
                "bearish"
            } else {
                "bullish"
            };
            signals.push(Signal {
                ticker: ticker.clone(),
                kind: SignalKind::SentimentExtreme,
                direction: format!("{label}_sentiment"),
                strength: (sentiment_score.abs() * 10.0).min(SENTIMENT_STRENGTH_CAP),
                reason: format!("Sentiment {label}: {sentiment_score:.2}"),
                timestamp: now,
            });
        }

        if signals.len() >= 2 {
            signals.push(Signal {
                ticker: ticker.clone(),
                kind: SignalKind::CombinedAlert,
                direction: "high_attention".to_string(),
                strength: COMBINED_ALERT_STRENGTH,
                reason: format!("Multipli segnali attivi ({})", signals.len()),
                timestamp: now,
            });
        }

        debug!(ticker = %ticker, fired = signals.len(), "signal evaluation complete");

        for signal in &signals {
            if self.recent.len() == self.history_limit {
                self.recent.pop_front();
            }
            self.recent.push_back(signal.clone());
        }

        signals
    }

    /// The most recent signals, newest last, optionally filtered by ticker.
    #[must_use]
    pub fn recent_signals(&self, ticker: Option<&Symbol>, limit: usize) -> Vec<Signal> {
        let filtered: Vec<&Signal> = self
            .recent
            .iter()
            .filter(|s| ticker.is_none_or(|t| &s.ticker == t))
            .collect();
        filtered
            .into_iter()
            .rev()
            .take(limit)
            .rev()
            .cloned()
            .collect()
    }

    /// Drop the trailing history.
    pub fn clear_signals(&mut self) {
        self.recent.clear();
    }
}
