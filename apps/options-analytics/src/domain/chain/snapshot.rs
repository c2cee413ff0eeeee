//! Option Chain Snapshot Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Symbol, Timestamp};

use super::contract::{OptionContract, OptionSide};

/// Immutable unit of work: all calls and puts for one underlying and one
/// expiration, captured at a single point in time.
///
/// An empty or single-sided snapshot is a valid input; calculators degrade
/// to documented defaults rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChainSnapshot {
    /// Underlying ticker.
    pub ticker: Symbol,
    /// Expiration date of every contract in the snapshot.
    pub expiration: NaiveDate,
    /// Spot price of the underlying at capture time (positive).
    pub spot_price: Decimal,
    /// When the snapshot was captured.
    pub captured_at: Timestamp,
    /// All contracts, both sides, any strike order.
    pub contracts: Vec<OptionContract>,
}

impl OptionChainSnapshot {
    /// Create a new snapshot captured now.
    #[must_use]
    pub fn new(
        ticker: Symbol,
        expiration: NaiveDate,
        spot_price: Decimal,
        contracts: Vec<OptionContract>,
    ) -> Self {
        Self {
            ticker,
            expiration,
            spot_price,
            captured_at: Timestamp::now(),
            contracts,
        }
    }

    /// Spot price as `f64` for the calculators.
    #[must_use]
    pub fn spot_f64(&self) -> f64 {
        self.spot_price.to_f64().unwrap_or(0.0)
    }

    /// All call contracts.
    pub fn calls(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts
            .iter()
            .filter(|c| c.side == OptionSide::Call)
    }

    /// All put contracts.
    pub fn puts(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(|c| c.side == OptionSide::Put)
    }

    /// Whether the snapshot has at least one call and one put.
    ///
    /// Skew and PCR need both sides; single-sided snapshots yield degraded
    /// results.
    #[must_use]
    pub fn is_two_sided(&self) -> bool {
        self.calls().next().is_some() && self.puts().next().is_some()
    }
}
