//! Data transfer objects for the persistence/presentation boundary.
//!
//! Every result flattens into a row of named scalars keyed by
//! `(ticker, expiration, timestamp)`. Undefined metrics are omitted from
//! the row rather than written as 0, so downstream stores can tell
//! "computed zero" from "insufficient data".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::pipeline::ChainMetrics;
use crate::analytics::signals::Signal;
use crate::domain::shared::{Symbol, Timestamp};

/// One row of computed metrics for the persistence store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Underlying ticker.
    pub ticker: Symbol,
    /// Chain expiration.
    pub expiration: NaiveDate,
    /// When the metrics were computed.
    pub timestamp: Timestamp,
    /// Named scalar metrics; undefined values are absent.
    pub values: BTreeMap<String, f64>,
    /// True when any stage substituted fallback values.
    pub is_degraded: bool,
}

impl MetricsRecord {
    /// Flatten pipeline metrics into a record row.
    #[must_use]
    pub fn from_metrics(ticker: Symbol, expiration: NaiveDate, metrics: &ChainMetrics) -> Self {
        let mut values = BTreeMap::new();

        for point in &metrics.skew.points {
            let d = (point.delta_target * 100.0).round() as u32;
            if let Some(call) = point.call {
                values.insert(format!("skew_{d}d_call"), call);
            }
            if let Some(put) = point.put {
                values.insert(format!("skew_{d}d_put"), put);
            }
            if let Some(net) = point.net {
                values.insert(format!("skew_{d}d_net"), net);
            }
        }
        values.insert("skew_index".to_string(), metrics.skew.skew_index);
        if let Some(mean) = metrics.iv_stats.mean {
            values.insert("iv_mean".to_string(), mean);
        }
        if let Some(std_dev) = metrics.iv_stats.std_dev {
            values.insert("iv_std".to_string(), std_dev);
        }
        if let Some(min) = metrics.iv_stats.min {
            values.insert("iv_min".to_string(), min);
        }
        if let Some(max) = metrics.iv_stats.max {
            values.insert("iv_max".to_string(), max);
        }
        values.insert(
            "num_options".to_string(),
            metrics.iv_stats.num_contracts as f64,
        );
        values.insert("num_calls".to_string(), metrics.skew.num_calls as f64);
        values.insert("num_puts".to_string(), metrics.skew.num_puts as f64);
        values.insert("current_price".to_string(), metrics.skew.spot_price);

        values.insert("put_volume".to_string(), metrics.pcr.put_volume as f64);
        values.insert("call_volume".to_string(), metrics.pcr.call_volume as f64);
        values.insert("put_oi".to_string(), metrics.pcr.put_oi as f64);
        values.insert("call_oi".to_string(), metrics.pcr.call_oi as f64);
        values.insert("pcr_volume".to_string(), metrics.pcr.pcr_volume);
        values.insert("pcr_oi".to_string(), metrics.pcr.pcr_oi);

        if let Some(regime) = &metrics.regime {
            values.insert("volatility_index".to_string(), regime.index_level);
            values.insert("volatility_delta".to_string(), regime.delta);
            values.insert("volatility_delta_weekly".to_string(), regime.weekly_delta);
            values.insert("market_return".to_string(), regime.market_return);
        }

        values.insert("max_pain".to_string(), metrics.walls.max_pain);
        if let Some(wall) = metrics.walls.call_wall {
            values.insert("call_wall_strike".to_string(), wall.strike);
            values.insert("call_wall_oi".to_string(), wall.open_interest as f64);
        }
        if let Some(wall) = metrics.walls.put_wall {
            values.insert("put_wall_strike".to_string(), wall.strike);
            values.insert("put_wall_oi".to_string(), wall.open_interest as f64);
        }

        Self {
            ticker,
            expiration,
            timestamp: metrics.skew.timestamp,
            values,
            is_degraded: metrics.is_degraded(),
        }
    }
}

/// Full output of one analysis cycle, returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Underlying ticker.
    pub ticker: Symbol,
    /// Chain expiration analyzed.
    pub expiration: NaiveDate,
    /// All per-snapshot metric results.
    pub metrics: ChainMetrics,
    /// Signals emitted in this cycle.
    pub signals: Vec<Signal>,
}
