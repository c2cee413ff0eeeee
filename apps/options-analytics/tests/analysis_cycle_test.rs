//! Analysis Cycle Integration Tests
//!
//! End-to-end tests driving `AnalyzeChainUseCase` through the in-memory
//! port adapters: a fragile chain escalating to a CRITICAL tier with all
//! four signals, a calm chain producing nothing, and degraded cycles where
//! collaborators fail.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use options_analytics::{
    AnalyzeChainUseCase, FixedSentiment, FragilityTier, InMemoryMetricsSink, MockMarketData,
    OptionChainSnapshot, OptionContract, OptionSide, SignalKind, Symbol, VolatilityHistoryPoint,
    VolatilityRegime,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
}

fn contract(
    strike: Decimal,
    side: OptionSide,
    volume: u64,
    oi: u64,
    iv: f64,
) -> OptionContract {
    OptionContract::new(strike, side, dec!(1.00), dec!(1.20), volume, oi)
        .with_implied_volatility(iv)
}

/// Call-heavy open interest, steep put skew: every alert threshold trips.
///
/// Hand-computed: pcr_oi = 530/1200 ≈ 0.442, pcr_volume = 160/100 = 1.6,
/// 25d net skew = 0.35 - 0.05 = 0.30.
fn fragile_chain() -> OptionChainSnapshot {
    OptionChainSnapshot::new(
        Symbol::new("SPY"),
        expiry(),
        dec!(100),
        vec![
            contract(dec!(105), OptionSide::Call, 60, 800, 0.20),
            contract(dec!(110), OptionSide::Call, 40, 400, 0.21),
            contract(dec!(95), OptionSide::Put, 100, 300, 0.25),
            contract(dec!(90), OptionSide::Put, 60, 230, 0.32),
        ],
    )
}

/// Balanced chain with flat IV: nothing fires.
fn calm_chain() -> OptionChainSnapshot {
    OptionChainSnapshot::new(
        Symbol::new("SPY"),
        expiry(),
        dec!(100),
        vec![
            contract(dec!(105), OptionSide::Call, 100, 1000, 0.20),
            contract(dec!(110), OptionSide::Call, 100, 1000, 0.20),
            contract(dec!(95), OptionSide::Put, 100, 1000, 0.20),
            contract(dec!(90), OptionSide::Put, 100, 1000, 0.20),
        ],
    )
}

fn use_case(
    market: MockMarketData,
    sentiment: FixedSentiment,
) -> (
    AnalyzeChainUseCase<MockMarketData, FixedSentiment, InMemoryMetricsSink>,
    Arc<InMemoryMetricsSink>,
) {
    let sink = Arc::new(InMemoryMetricsSink::new());
    let use_case = AnalyzeChainUseCase::new(Arc::new(market), Arc::new(sentiment), sink.clone());
    (use_case, sink)
}

#[tokio::test]
async fn test_fragile_cycle_escalates_to_critical_with_all_signals() {
    let market = MockMarketData::new();
    market.set_chain(fragile_chain());
    market.set_volatility_history(VolatilityHistoryPoint::new(24.0, 20.0, 19.0));
    market.set_market_return(-1.5);
    let (use_case, sink) = use_case(market, FixedSentiment::new(0.6));

    let report = use_case
        .execute(&Symbol::new("SPY"), expiry())
        .await
        .expect("cycle should succeed");

    // PCR: 530/1200 below the 0.9 fragility threshold.
    assert!((report.metrics.pcr.pcr_oi - 530.0 / 1200.0).abs() < 1e-9);
    assert!(report.metrics.pcr.fragility_alert);

    // Regime: -1.5% return with a +4.0 volatility jump.
    let regime = report.metrics.regime.expect("history was supplied");
    assert_eq!(regime.regime, VolatilityRegime::Panic);
    assert!(regime.is_spiking);

    // All four fragility conditions hold at once.
    assert_eq!(report.metrics.fragility.tier, FragilityTier::Critical);

    // Skew, PCR, and sentiment all fire, plus the combined alert.
    assert_eq!(report.signals.len(), 4);
    let kinds: Vec<SignalKind> = report.signals.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&SignalKind::SkewHigh));
    assert!(kinds.contains(&SignalKind::PcrHigh));
    assert!(kinds.contains(&SignalKind::SentimentExtreme));
    assert!(kinds.contains(&SignalKind::CombinedAlert));

    // One record row and every signal persisted.
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert!((records[0].values["pcr_oi"] - 530.0 / 1200.0).abs() < 1e-9);
    assert!(records[0].values.contains_key("max_pain"));
    assert!(records[0].values.contains_key("iv_mean"));
    assert!((records[0].values["num_options"] - 4.0).abs() < f64::EPSILON);
    assert_eq!(sink.signals().len(), 4);
}

#[tokio::test]
async fn test_calm_cycle_emits_nothing() {
    let market = MockMarketData::new();
    market.set_chain(calm_chain());
    market.set_volatility_history(VolatilityHistoryPoint::new(14.0, 14.2, 15.0));
    market.set_market_return(0.4);
    let (use_case, sink) = use_case(market, FixedSentiment::new(0.1));

    let report = use_case
        .execute(&Symbol::new("SPY"), expiry())
        .await
        .expect("cycle should succeed");

    assert_eq!(report.metrics.fragility.tier, FragilityTier::Low);
    assert_eq!(
        report.metrics.regime.unwrap().regime,
        VolatilityRegime::Calm
    );
    assert!(report.signals.is_empty());
    assert_eq!(sink.records().len(), 1);
    assert!(sink.signals().is_empty());
}

#[tokio::test]
async fn test_missing_collaborators_degrade_not_error() {
    // No volatility history, no market return, sentiment feed down.
    let market = MockMarketData::new();
    market.set_chain(fragile_chain());
    let (use_case, sink) = use_case(market, FixedSentiment::unavailable());

    let report = use_case
        .execute(&Symbol::new("SPY"), expiry())
        .await
        .expect("cycle should degrade, not fail");

    assert!(report.metrics.regime.is_none());
    // Fragility cannot reach CRITICAL without the spike/decline flags.
    assert_eq!(report.metrics.fragility.tier, FragilityTier::High);
    // No sentiment signal; skew and PCR still fire, so the combined alert too.
    assert_eq!(report.signals.len(), 3);
    assert!(
        report
            .signals
            .iter()
            .all(|s| s.kind != SignalKind::SentimentExtreme)
    );
    assert_eq!(sink.records().len(), 1);
}

#[tokio::test]
async fn test_missing_chain_is_an_error() {
    let (use_case, sink) = use_case(MockMarketData::new(), FixedSentiment::new(0.0));

    let result = use_case.execute(&Symbol::new("SPY"), expiry()).await;
    assert!(result.is_err());
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_session_buffer_accumulates_across_cycles() {
    let market = MockMarketData::new();
    market.set_chain(fragile_chain());
    let (use_case, _sink) = use_case(market, FixedSentiment::new(0.6));

    let ticker = Symbol::new("SPY");
    use_case.execute(&ticker, expiry()).await.unwrap();
    use_case.execute(&ticker, expiry()).await.unwrap();

    // Two cycles x four signals each.
    assert_eq!(use_case.recent_signals(None, 100).len(), 8);
    assert_eq!(use_case.recent_signals(Some(&ticker), 3).len(), 3);

    use_case.clear_signals();
    assert!(use_case.recent_signals(None, 100).is_empty());
}
