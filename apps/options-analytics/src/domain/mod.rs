//! Domain layer - immutable value objects consumed by the calculators.
//!
//! Every entity here is created fresh per analysis cycle and discarded once
//! the results are returned; no calculator holds a long-lived mutable
//! reference to chain data.

pub mod chain;
pub mod shared;

pub use chain::{OptionChainSnapshot, OptionContract, OptionSide, VolatilityHistoryPoint};
pub use shared::{Symbol, Timestamp};
