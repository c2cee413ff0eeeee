//! Configuration for the analytics engine.
//!
//! Only shape-level knobs live here (delta points, wall threshold, history
//! cap). The interpretation thresholds of the calculators (1.5 volume PCR,
//! 0.9/1.0 OI fragility tiers, 0.02 skew alert, 2.0/3.0 regime deltas,
//! 80/180 skew-index clamp) are contractual constants and deliberately not
//! configurable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::signals::SIGNAL_HISTORY_LIMIT;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Analytics engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Delta points sampled on each side's IV curve.
    #[serde(default = "default_delta_points")]
    pub delta_points: Vec<f64>,
    /// Open interest a strike must exceed to count as a wall.
    #[serde(default = "default_min_wall_open_interest")]
    pub min_wall_open_interest: u64,
    /// Trailing signals kept for the caller (capped at 50).
    #[serde(default = "default_signal_history_limit")]
    pub signal_history_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            delta_points: default_delta_points(),
            min_wall_open_interest: default_min_wall_open_interest(),
            signal_history_limit: default_signal_history_limit(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delta_points.is_empty() {
            return Err(ConfigError::ValidationError(
                "delta_points must not be empty".to_string(),
            ));
        }
        for &delta in &self.delta_points {
            if !(0.0..1.0).contains(&delta) || delta == 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "delta point must be in (0, 1), got: {delta}"
                )));
            }
        }
        if self.signal_history_limit == 0 || self.signal_history_limit > SIGNAL_HISTORY_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "signal_history_limit must be in 1..={SIGNAL_HISTORY_LIMIT}, got: {}",
                self.signal_history_limit
            )));
        }
        Ok(())
    }
}

fn default_delta_points() -> Vec<f64> {
    crate::analytics::skew::DEFAULT_DELTA_POINTS.to_vec()
}

const fn default_min_wall_open_interest() -> u64 {
    500
}

const fn default_signal_history_limit() -> usize {
    SIGNAL_HISTORY_LIMIT
}

/// Load configuration from a YAML file, validating it.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed, or validated.
pub fn load_config(path: &str) -> Result<AnalyticsConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;
    let config: AnalyticsConfig = serde_yaml_bw::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delta_points, vec![0.25, 0.10]);
        assert_eq!(config.min_wall_open_interest, 500);
        assert_eq!(config.signal_history_limit, 50);
    }

    #[test]
    fn test_empty_delta_points_rejected() {
        let config = AnalyticsConfig {
            delta_points: vec![],
            ..AnalyticsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_out_of_range_delta_rejected() {
        for bad in [0.0, 1.0, 1.5, -0.25] {
            let config = AnalyticsConfig {
                delta_points: vec![bad],
                ..AnalyticsConfig::default()
            };
            assert!(config.validate().is_err(), "delta {bad} should be rejected");
        }
    }

    #[test]
    fn test_yaml_round_trip_with_defaults() {
        let config: AnalyticsConfig = serde_yaml_bw::from_str("delta_points: [0.25]\n").unwrap();
        assert_eq!(config.delta_points, vec![0.25]);
        assert_eq!(config.min_wall_open_interest, 500);
        assert!(config.validate().is_ok());
    }
}
