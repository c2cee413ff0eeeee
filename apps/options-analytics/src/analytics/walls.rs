//! Option Wall Locator
//!
//! Finds the open-interest-dominant strike on each side of the chain and
//! the max-pain strike.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::chain::{OptionChainSnapshot, OptionContract};
use crate::domain::shared::Timestamp;

/// An open-interest-dominant strike on one side of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// The wall strike.
    pub strike: f64,
    /// Open interest concentrated at the strike.
    pub open_interest: u64,
    /// Signed distance from spot, `strike - spot`.
    pub distance: f64,
    /// Signed distance from spot in percent.
    pub distance_pct: f64,
}

/// Output of the wall locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallsResult {
    /// Call-side wall, when one clears the open-interest threshold.
    pub call_wall: Option<Wall>,
    /// Put-side wall, when one clears the open-interest threshold.
    pub put_wall: Option<Wall>,
    /// Strike minimizing aggregate writer payout; 0 when either side is
    /// empty (degraded).
    pub max_pain: f64,
    /// Spot price the calculation used.
    pub spot_price: f64,
    /// When the result was computed.
    pub timestamp: Timestamp,
    /// True when a side was empty and defaults were substituted.
    pub is_degraded: bool,
}

/// Option wall and max-pain locator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallLocator;

impl WallLocator {
    /// Create a new locator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Locate walls and the max-pain strike.
    ///
    /// A wall is reported only when its open interest exceeds
    /// `min_open_interest`. Empty sides degrade to `None` walls and
    /// `max_pain = 0` rather than failing.
    #[must_use]
    pub fn locate(&self, snapshot: &OptionChainSnapshot, min_open_interest: u64) -> WallsResult {
        let spot = snapshot.spot_f64();
        let calls: Vec<&OptionContract> = snapshot.calls().collect();
        let puts: Vec<&OptionContract> = snapshot.puts().collect();

        let call_wall = Self::side_wall(&calls, spot, min_open_interest);
        let put_wall = Self::side_wall(&puts, spot, min_open_interest);

        let (max_pain, degraded) = if calls.is_empty() || puts.is_empty() {
            warn!(
                ticker = %snapshot.ticker,
                num_calls = calls.len(),
                num_puts = puts.len(),
                "one-sided chain; max pain degraded to 0"
            );
            (0.0, true)
        } else {
            (Self::max_pain(&calls, &puts), false)
        };

        WallsResult {
            call_wall,
            put_wall,
            max_pain,
            spot_price: spot,
            timestamp: Timestamp::now(),
            is_degraded: degraded,
        }
    }

    /// The single highest-OI contract on a side, if it clears the threshold.
    fn side_wall(contracts: &[&OptionContract], spot: f64, min_open_interest: u64) -> Option<Wall> {
        let dominant = contracts.iter().max_by(|a, b| {
            a.open_interest
                .cmp(&b.open_interest)
                // Ties resolve to the lower strike.
                .then_with(|| b.strike.cmp(&a.strike))
        })?;

        if dominant.open_interest <= min_open_interest {
            return None;
        }

        let strike = dominant.strike_f64();
        let distance = strike - spot;
        Some(Wall {
            strike,
            open_interest: dominant.open_interest,
            distance,
            distance_pct: if spot > 0.0 {
                distance / spot * 100.0
            } else {
                0.0
            },
        })
    }

    /// Max pain over the distinct strikes of both sides.
    ///
    /// `pain(K) = sum(call OI at strikes < K) + sum(put OI at strikes > K)`;
    /// the max-pain strike minimizes pain, ties broken by the lowest strike.
    fn max_pain(calls: &[&OptionContract], puts: &[&OptionContract]) -> f64 {
        let strikes: BTreeSet<Decimal> = calls
            .iter()
            .chain(puts.iter())
            .map(|c| c.strike)
            .collect();

        let mut best: Option<(Decimal, u64)> = None;
        for &k in &strikes {
            let pain: u64 = calls
                .iter()
                .filter(|c| c.strike < k)
                .map(|c| c.open_interest)
                .sum::<u64>()
                + puts
                    .iter()
                    .filter(|p| p.strike > k)
                    .map(|p| p.open_interest)
                    .sum::<u64>();

            // BTreeSet iterates strikes ascending, so strict less-than keeps
            // the lowest strike on ties.
            match best {
                Some((_, best_pain)) if pain >= best_pain => {}
                _ => best = Some((k, pain)),
            }
        }

        best.map_or(0.0, |(k, _)| {
            rust_decimal::prelude::ToPrimitive::to_f64(&k).unwrap_or(0.0)
        })
    }
}
