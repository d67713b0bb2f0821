//! BDD scenarios for rotation tracking and signal generation.
//!
//! Covers:
//! - The rule table against single transitions
//! - A full clockwise rotation driven through the engine from prices
//! - Re-running a grown series only emits the new dates

use chrono::NaiveDate;
use rrg_core::domain::{
    InstrumentId, PriceSeries, Quadrant, RelativeStrengthPoint, RuleId, Signal, SignalKind,
    Transition,
};
use rrg_core::relative_strength::{RelativeStrengthMethod, RsSeries};
use rrg_core::signals::{EvaluationContext, SignalEngine, UniverseSnapshot};
use rrg_core::{QuadrantClassifier, RotationEngine, RotationTracker, RrgConfig};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
}

/// RS-Ratio = price ratio - 1, RS-Momentum = one-step change of RS-Ratio.
struct RatioChange;

impl RelativeStrengthMethod for RatioChange {
    fn name(&self) -> &str {
        "ratio_change"
    }

    fn min_history(&self) -> usize {
        2
    }

    fn compute(&self, ratio: &[f64]) -> RsSeries {
        let rs_ratio: Vec<f64> = ratio.iter().map(|r| r - 1.0).collect();
        let rs_momentum = (0..ratio.len())
            .map(|i| if i == 0 { f64::NAN } else { rs_ratio[i] - rs_ratio[i - 1] })
            .collect();
        RsSeries {
            rs_ratio,
            rs_momentum,
        }
    }
}

fn flat_benchmark(days: usize) -> PriceSeries {
    PriceSeries::from_pairs("SPY", (0..days).map(|i| (day(1 + i as u32), 100.0))).unwrap()
}

/// Prices whose ratio to a flat 100 benchmark walks
/// Leading, Weakening, Lagging, Improving, Leading after one warm-up day.
fn clockwise_prices() -> PriceSeries {
    let prices = [100.0, 110.0, 105.0, 95.0, 98.0, 104.0];
    PriceSeries::from_pairs(
        "XLK",
        prices.iter().enumerate().map(|(i, p)| (day(1 + i as u32), *p)),
    )
    .unwrap()
}

fn kinds(signals: &[Signal]) -> Vec<SignalKind> {
    signals.iter().map(|s| s.kind).collect()
}

fn evaluate(current: Quadrant, transition: Option<Transition>) -> Vec<Signal> {
    let instrument = InstrumentId::from("XLK");
    let ctx = EvaluationContext {
        instrument: &instrument,
        date: day(4),
        current,
        transition,
    };
    SignalEngine::default().evaluate(&ctx, &UniverseSnapshot::new())
}

// ──────────────────────────────────────────────
// Rule table
// ──────────────────────────────────────────────

#[test]
fn bdd_scenario_weakening_to_leading_reaccelerates() {
    // GIVEN an instrument that moved from Weakening back to Leading
    let transition = Some(Transition::new(Quadrant::Weakening, Quadrant::Leading));

    // WHEN the rules are evaluated
    let signals = evaluate(Quadrant::Leading, transition);

    // THEN both the leading-strength and reacceleration buys fire, in table order
    let rules: Vec<RuleId> = signals.iter().map(|s| s.rule).collect();
    assert_eq!(
        rules,
        vec![RuleId::LeadingStrength, RuleId::MomentumReacceleration]
    );
    assert_eq!(kinds(&signals), vec![SignalKind::Buy, SignalKind::Buy]);
}

#[test]
fn bdd_scenario_leading_to_weakening_takes_profit_and_stops() {
    // GIVEN an instrument that slipped from Leading to Weakening
    let transition = Some(Transition::new(Quadrant::Leading, Quadrant::Weakening));

    // WHEN the rules are evaluated
    let signals = evaluate(Quadrant::Weakening, transition);

    // THEN it gets a take-profit Sell and a StopLoss
    assert_eq!(kinds(&signals), vec![SignalKind::Sell, SignalKind::StopLoss]);
    assert_eq!(signals[0].rule, RuleId::TakeProfit);
    assert_eq!(signals[1].rule, RuleId::StopLoss);
}

#[test]
fn bdd_scenario_leading_straight_to_lagging_stops_out() {
    // GIVEN a jump across the origin from Leading to Lagging
    let transition = Some(Transition::new(Quadrant::Leading, Quadrant::Lagging));

    // WHEN the rules are evaluated
    let signals = evaluate(Quadrant::Lagging, transition);

    // THEN the lagging Sell and the StopLoss both fire, but no take-profit
    let rules: Vec<RuleId> = signals.iter().map(|s| s.rule).collect();
    assert_eq!(rules, vec![RuleId::LaggingWeakness, RuleId::StopLoss]);
}

#[test]
fn bdd_scenario_first_observation_fires_no_transition_rules() {
    // GIVEN a tracker with a single Improving entry
    let mut tracker = RotationTracker::new(QuadrantClassifier::default());
    let instrument = InstrumentId::from("XLV");
    tracker
        .record(&instrument, &RelativeStrengthPoint::new(day(2), -0.02, 0.01))
        .unwrap();

    // WHEN the latest state is evaluated
    let signals =
        SignalEngine::default().evaluate_latest(&tracker, &instrument, &UniverseSnapshot::new());

    // THEN nothing fires: Improving has no membership rule and there is no transition
    assert!(tracker.last_transition(&instrument).is_none());
    assert!(signals.is_empty());
}

#[test]
fn bdd_scenario_improving_without_transition_is_silent() {
    // GIVEN an instrument that stayed in Improving
    let transition = Some(Transition::new(Quadrant::Improving, Quadrant::Improving));

    // WHEN the rules are evaluated
    let signals = evaluate(Quadrant::Improving, transition);

    // THEN no rule matches
    assert!(signals.is_empty());
}

// ──────────────────────────────────────────────
// End to end
// ──────────────────────────────────────────────

#[test]
fn bdd_scenario_full_clockwise_rotation_from_prices() {
    // GIVEN an engine using the ratio-change method and a flat benchmark
    let mut engine = RotationEngine::with_method(RrgConfig::default(), RatioChange).unwrap();

    // WHEN the rotating instrument is run
    let report = engine.run(&flat_benchmark(6), &[clockwise_prices()]);

    // THEN five cycles walk the quadrants clockwise
    assert!(report.failures.is_empty());
    assert_eq!(report.method, "ratio_change");
    let quadrants: Vec<Quadrant> = report
        .cycles
        .iter()
        .map(|c| c.rotations[0].quadrant)
        .collect();
    assert_eq!(
        quadrants,
        vec![
            Quadrant::Leading,
            Quadrant::Weakening,
            Quadrant::Lagging,
            Quadrant::Improving,
            Quadrant::Leading,
        ]
    );

    // AND each cycle carries the expected signals
    let per_cycle: Vec<Vec<SignalKind>> =
        report.cycles.iter().map(|c| kinds(&c.signals)).collect();
    assert_eq!(
        per_cycle,
        vec![
            vec![SignalKind::Buy],
            vec![SignalKind::Sell, SignalKind::StopLoss],
            vec![SignalKind::Sell],
            vec![SignalKind::Buy],
            vec![SignalKind::Buy],
        ]
    );

    // AND every transition was clockwise
    let history = engine.tracker().history(&"XLK".into()).unwrap();
    assert_eq!(history.rotations().len(), 4);
    assert!(history.rotations().iter().all(|(_, t)| t.is_clockwise()));
}

#[test]
fn bdd_scenario_rerun_only_emits_new_dates() {
    // GIVEN an engine that has already processed the first four days
    let mut engine = RotationEngine::with_method(RrgConfig::default(), RatioChange).unwrap();
    let full = clockwise_prices();
    let head = PriceSeries::new("XLK", full.observations()[..4].to_vec()).unwrap();
    let first = engine.run(&flat_benchmark(6), &[head]);
    assert_eq!(first.cycles.len(), 3);

    // WHEN the same run is replayed, then the grown series is fed
    let same_head = PriceSeries::new("XLK", full.observations()[..4].to_vec()).unwrap();
    let replay = engine.run(&flat_benchmark(4), &[same_head]);
    let grown = engine.run(&flat_benchmark(6), &[full]);

    // THEN the replay is empty and only the two new dates are emitted
    assert!(replay.cycles.is_empty());
    assert!(replay.failures.is_empty());
    let dates: Vec<NaiveDate> = grown.cycles.iter().map(|c| c.date).collect();
    assert_eq!(dates, vec![day(5), day(6)]);
    assert_eq!(
        grown.cycles[0].rotations[0].transition,
        Some(Transition::new(Quadrant::Lagging, Quadrant::Improving))
    );
}

#[test]
fn bdd_scenario_benchmark_in_universe_is_ignored() {
    // GIVEN a universe that also lists the benchmark itself
    let mut engine = RotationEngine::with_method(RrgConfig::default(), RatioChange).unwrap();
    let benchmark = flat_benchmark(6);

    // WHEN it is run
    let report = engine.run(&benchmark, &[benchmark.clone(), clockwise_prices()]);

    // THEN only the real instrument is tracked
    assert_eq!(engine.tracker().len(), 1);
    assert!(report
        .cycles
        .iter()
        .all(|c| c.rotations.iter().all(|r| r.instrument.as_str() == "XLK")));
}
