//! Option chain value objects: contracts, snapshots, volatility history.

mod contract;
mod history;
mod snapshot;

pub use contract::{OptionContract, OptionSide};
pub use history::VolatilityHistoryPoint;
pub use snapshot::OptionChainSnapshot;
