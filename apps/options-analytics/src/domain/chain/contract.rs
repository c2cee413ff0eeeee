//! Option Contract Value Object

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Option side (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionSide {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// One tradable strike/side of the options chain.
///
/// Prices are `Decimal` at the data boundary; the calculators convert to
/// `f64` internally. Malformed quotes (negative prices, `bid > ask`) are
/// expected to be rejected at ingestion, before this type is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Strike price (positive).
    pub strike: Decimal,
    /// Call or put.
    pub side: OptionSide,
    /// Best bid (non-negative).
    pub bid: Decimal,
    /// Best ask (non-negative, `bid <= ask`).
    pub ask: Decimal,
    /// Contracts traded today.
    pub volume: u64,
    /// Outstanding contracts at this strike.
    pub open_interest: u64,
    /// Provider-supplied implied volatility, when available.
    pub implied_volatility: Option<f64>,
    /// Provider-supplied delta in [-1, 1], when available.
    pub delta: Option<f64>,
}

impl OptionContract {
    /// Create a contract with no provider-supplied greeks.
    #[must_use]
    pub const fn new(
        strike: Decimal,
        side: OptionSide,
        bid: Decimal,
        ask: Decimal,
        volume: u64,
        open_interest: u64,
    ) -> Self {
        Self {
            strike,
            side,
            bid,
            ask,
            volume,
            open_interest,
            implied_volatility: None,
            delta: None,
        }
    }

    /// Attach a provider-supplied implied volatility.
    #[must_use]
    pub const fn with_implied_volatility(mut self, iv: f64) -> Self {
        self.implied_volatility = Some(iv);
        self
    }

    /// Attach a provider-supplied delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Mid price, `(bid + ask) / 2`.
    #[must_use]
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Mid price as `f64` for the calculators.
    #[must_use]
    pub fn mid_f64(&self) -> f64 {
        self.mid().to_f64().unwrap_or(0.0)
    }

    /// Strike as `f64` for the calculators.
    #[must_use]
    pub fn strike_f64(&self) -> f64 {
        self.strike.to_f64().unwrap_or(0.0)
    }

    /// Moneyness, `strike / spot`.
    #[must_use]
    pub fn moneyness(&self, spot: f64) -> f64 {
        if spot <= 0.0 {
            return 0.0;
        }
        self.strike_f64() / spot
    }

    /// Whether the contract is out of the money at the given spot.
    ///
    /// OTM means `strike > spot` for calls and `strike < spot` for puts.
    #[must_use]
    pub fn is_otm(&self, spot: f64) -> bool {
        match self.side {
            OptionSide::Call => self.strike_f64() > spot,
            OptionSide::Put => self.strike_f64() < spot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn call(strike: Decimal) -> OptionContract {
        OptionContract::new(strike, OptionSide::Call, dec!(1.00), dec!(1.20), 10, 100)
    }

    #[test]
    fn test_mid_price() {
        let contract = call(dec!(105));
        assert_eq!(contract.mid(), dec!(1.10));
    }

    #[test]
    fn test_moneyness() {
        let contract = call(dec!(110));
        assert!((contract.moneyness(100.0) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_otm_classification() {
        let otm_call = call(dec!(110));
        assert!(otm_call.is_otm(100.0));

        let itm_call = call(dec!(90));
        assert!(!itm_call.is_otm(100.0));

        let otm_put =
            OptionContract::new(dec!(90), OptionSide::Put, dec!(0.50), dec!(0.70), 5, 50);
        assert!(otm_put.is_otm(100.0));
        assert!(!otm_put.is_otm(85.0));
    }

    #[test]
    fn test_side_serializes_screaming_snake() {
        let json = serde_json::to_string(&OptionSide::Call).unwrap();
        assert_eq!(json, "\"CALL\"");
    }
}
