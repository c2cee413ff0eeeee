//! Volatility Index History Value Object

use serde::{Deserialize, Serialize};

/// A trailing window of volatility-index readings supplied by the caller.
///
/// The engine never fetches this itself; the market-data collaborator passes
/// it in alongside the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityHistoryPoint {
    /// Most recent volatility-index reading.
    pub current: f64,
    /// Previous reading (typically prior session close).
    pub previous: f64,
    /// Reading from one week ago.
    pub week_ago: f64,
}

impl VolatilityHistoryPoint {
    /// Create a new history point.
    #[must_use]
    pub const fn new(current: f64, previous: f64, week_ago: f64) -> Self {
        Self {
            current,
            previous,
            week_ago,
        }
    }

    /// Session-over-session change, `current - previous`.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.current - self.previous
    }

    /// Week-over-week change, `current - week_ago`.
    #[must_use]
    pub fn weekly_delta(&self) -> f64 {
        self.current - self.week_ago
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas() {
        let point = VolatilityHistoryPoint::new(24.0, 20.0, 18.5);
        assert!((point.delta() - 4.0).abs() < 1e-12);
        assert!((point.weekly_delta() - 5.5).abs() < 1e-12);
    }
}
