//! Rotation engine: runs a universe through relative strength, tracking and
//! signal evaluation in date-ordered cycles.
//!
//! Each cycle has two phases separated by a barrier:
//! 1. every instrument with a point at the cycle date is classified and
//!    appended to its history (sequential, cheap);
//! 2. the universe snapshot is materialized from the updated instruments and
//!    signals are evaluated in parallel against that read-only snapshot.
//!
//! A failure for one instrument is recorded and never stops the others.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::{debug, info, warn};

use crate::analytics::{Heading, Strength};
use crate::classifier::QuadrantClassifier;
use crate::config::{ConfigError, RrgConfig};
use crate::data::{ProviderError, SeriesProvider};
use crate::domain::{
    InstrumentId, PriceSeries, Quadrant, RelativeStrengthPoint, Signal, Transition,
};
use crate::error::{ErrorCategory, RrgError};
use crate::relative_strength::{
    JdkRelativeStrength, RelativeStrengthCalculator, RelativeStrengthMethod,
};
use crate::signals::{EvaluationContext, SignalEngine, SnapshotEntry, UniverseSnapshot};
use crate::tracker::{AppendOutcome, RotationTracker};

/// One instrument's position on the RRG at a cycle date.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentRotation {
    pub instrument: InstrumentId,
    pub point: RelativeStrengthPoint,
    pub quadrant: Quadrant,
    pub transition: Option<Transition>,
    pub strength: Strength,
    pub heading: Option<Heading>,
}

/// Everything produced at one date.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub date: NaiveDate,
    pub rotations: Vec<InstrumentRotation>,
    pub signals: Vec<Signal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstrumentFailure {
    pub instrument: InstrumentId,
    /// `None` when the whole series failed (e.g. insufficient history).
    pub date: Option<NaiveDate>,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip)]
    pub error: RrgError,
}

impl InstrumentFailure {
    fn new(instrument: InstrumentId, date: Option<NaiveDate>, error: RrgError) -> Self {
        Self {
            instrument,
            date,
            category: error.category(),
            message: error.to_string(),
            error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config_fingerprint: String,
    pub method: String,
    pub benchmark: InstrumentId,
    pub cycles: Vec<CycleReport>,
    pub failures: Vec<InstrumentFailure>,
}

impl RunReport {
    /// Signal stream in emission order.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.cycles.iter().flat_map(|c| c.signals.iter())
    }

    pub fn latest(&self) -> Option<&CycleReport> {
        self.cycles.last()
    }
}

pub struct RotationEngine {
    config: RrgConfig,
    calculator: RelativeStrengthCalculator,
    tracker: RotationTracker,
    signals: SignalEngine,
    trails: HashMap<InstrumentId, VecDeque<RelativeStrengthPoint>>,
}

impl RotationEngine {
    /// Engine with the JdK method configured from `config`.
    pub fn new(config: RrgConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let method = JdkRelativeStrength::from_config(&config.relative_strength);
        Self::with_method(config, method)
    }

    /// Engine with a custom relative strength method. The
    /// `relative_strength` section of `config` is ignored, and the report
    /// fingerprint hashes the method name in its place.
    pub fn with_method(
        config: RrgConfig,
        method: impl RelativeStrengthMethod + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            calculator: RelativeStrengthCalculator::new(method),
            tracker: RotationTracker::new(QuadrantClassifier::new(config.classifier.zero_policy)),
            signals: SignalEngine::new(&config.signals),
            trails: HashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &RrgConfig {
        &self.config
    }

    /// Fingerprint stamped on every [`RunReport`]: the settings in effect
    /// plus the relative strength method name.
    pub fn fingerprint(&self) -> String {
        self.config.run_fingerprint(self.calculator.method().name())
    }

    pub fn tracker(&self) -> &RotationTracker {
        &self.tracker
    }

    pub fn signal_engine(&self) -> &SignalEngine {
        &self.signals
    }

    /// Run every instrument against `benchmark`.
    ///
    /// Dates already recorded by an earlier run are skipped, so feeding a
    /// grown series again only produces cycles for the new dates. A series
    /// for the benchmark itself is ignored.
    pub fn run(&mut self, benchmark: &PriceSeries, instruments: &[PriceSeries]) -> RunReport {
        let calculator = &self.calculator;
        let computed: Vec<(InstrumentId, Result<Vec<RelativeStrengthPoint>, RrgError>)> =
            instruments
                .par_iter()
                .filter(|s| s.instrument() != benchmark.instrument())
                .map(|s| (s.instrument().clone(), calculator.calculate(s, benchmark)))
                .collect();

        let mut failures = Vec::new();
        let mut by_date: BTreeMap<NaiveDate, BTreeMap<InstrumentId, RelativeStrengthPoint>> =
            BTreeMap::new();

        for (instrument, result) in computed {
            match result {
                Ok(points) => {
                    let last = self.tracker.last_date(&instrument);
                    for point in points.into_iter().filter(|p| last.map_or(true, |l| p.date > l)) {
                        by_date
                            .entry(point.date)
                            .or_default()
                            .insert(instrument.clone(), point);
                    }
                }
                Err(error) => {
                    warn!(%instrument, %error, "relative strength unavailable");
                    failures.push(InstrumentFailure::new(instrument, None, error));
                }
            }
        }

        let mut cycles = Vec::with_capacity(by_date.len());
        for (date, points) in &by_date {
            let (cycle, cycle_failures) = self.step(*date, points);
            failures.extend(cycle_failures);
            if !cycle.rotations.is_empty() {
                cycles.push(cycle);
            }
        }

        let report = RunReport {
            config_fingerprint: self.fingerprint(),
            method: self.calculator.method().name().to_string(),
            benchmark: benchmark.instrument().clone(),
            cycles,
            failures,
        };

        info!(
            benchmark = %report.benchmark,
            instruments = instruments.len(),
            cycles = report.cycles.len(),
            signals = report.signals().count(),
            failures = report.failures.len(),
            "rotation run complete"
        );

        report
    }

    /// Fetch the benchmark and every other instrument from `provider`, then run.
    pub fn run_provider(
        &mut self,
        provider: &dyn SeriesProvider,
        benchmark: &InstrumentId,
    ) -> Result<RunReport, ProviderError> {
        let benchmark_series = provider.fetch(benchmark)?;
        let instruments = provider
            .instruments()
            .into_iter()
            .filter(|id| id != benchmark)
            .map(|id| provider.fetch(&id))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            provider = provider.name(),
            %benchmark,
            instruments = instruments.len(),
            "series loaded"
        );

        Ok(self.run(&benchmark_series, &instruments))
    }

    /// Evaluate one cycle from points already computed for `date`.
    ///
    /// A point dated other than `date` is reported as a `DateMismatch`
    /// failure and never reaches the history. Instruments whose point was
    /// already recorded are left out of the cycle.
    pub fn step(
        &mut self,
        date: NaiveDate,
        points: &BTreeMap<InstrumentId, RelativeStrengthPoint>,
    ) -> (CycleReport, Vec<InstrumentFailure>) {
        let lookback = self.config.analytics.heading_lookback;
        let mut failures = Vec::new();
        let mut updated: Vec<(&InstrumentId, &RelativeStrengthPoint, Option<Heading>)> =
            Vec::with_capacity(points.len());

        // Phase 1: update every history for this date.
        for (instrument, point) in points {
            if point.date != date {
                let error = RrgError::DateMismatch {
                    instrument: instrument.clone(),
                    expected: date,
                    actual: point.date,
                };
                warn!(%instrument, %date, %error, "point not recorded");
                failures.push(InstrumentFailure::new(
                    instrument.clone(),
                    Some(point.date),
                    error,
                ));
                continue;
            }
            match self.tracker.record(instrument, point) {
                Ok(AppendOutcome::Appended) => {
                    let trail = self.trails.entry(instrument.clone()).or_default();
                    trail.push_back(*point);
                    while trail.len() > lookback + 1 {
                        trail.pop_front();
                    }
                    let heading = Heading::from_trail(trail.make_contiguous(), lookback);
                    updated.push((instrument, point, heading));
                }
                Ok(AppendOutcome::AlreadyRecorded) => {}
                Err(error) => {
                    warn!(%instrument, %date, %error, "point not recorded");
                    failures.push(InstrumentFailure::new(
                        instrument.clone(),
                        Some(point.date),
                        error,
                    ));
                }
            }
        }

        // Barrier: the snapshot is complete before any evaluation starts.
        let mut snapshot = UniverseSnapshot::new();
        for (instrument, point, _) in &updated {
            if let Some(quadrant) = self.tracker.current(instrument) {
                snapshot.insert(
                    (*instrument).clone(),
                    SnapshotEntry {
                        quadrant,
                        transition: self.tracker.last_transition(instrument),
                        distance: point.distance(),
                    },
                );
            }
        }

        // Phase 2: evaluate against the frozen snapshot.
        let tracker = &self.tracker;
        let engine = &self.signals;
        let radius = self.config.analytics.strength_radius;
        let evaluated: Vec<(InstrumentRotation, Vec<Signal>)> = updated
            .par_iter()
            .filter_map(|(instrument, point, heading)| {
                let entry = snapshot.get(instrument)?;
                let ctx = EvaluationContext {
                    instrument,
                    date: point.date,
                    current: entry.quadrant,
                    transition: tracker.last_transition(instrument),
                };
                let signals = engine.evaluate(&ctx, &snapshot);
                let rotation = InstrumentRotation {
                    instrument: (*instrument).clone(),
                    point: **point,
                    quadrant: entry.quadrant,
                    transition: entry.transition,
                    strength: Strength::grade(point, radius),
                    heading: *heading,
                };
                Some((rotation, signals))
            })
            .collect();

        let mut cycle = CycleReport {
            date,
            rotations: Vec::with_capacity(evaluated.len()),
            signals: Vec::new(),
        };
        for (rotation, signals) in evaluated {
            cycle.rotations.push(rotation);
            cycle.signals.extend(signals);
        }

        debug!(
            %date,
            instruments = cycle.rotations.len(),
            signals = cycle.signals.len(),
            failures = failures.len(),
            "cycle evaluated"
        );

        (cycle, failures)
    }
}

impl std::fmt::Debug for RotationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationEngine")
            .field("config", &self.config)
            .field("calculator", &self.calculator)
            .field("instruments", &self.tracker.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RuleId, SignalKind};

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    fn points(entries: &[(&str, f64, f64)], date: NaiveDate) -> BTreeMap<InstrumentId, RelativeStrengthPoint> {
        entries
            .iter()
            .map(|(id, x, y)| (InstrumentId::from(*id), RelativeStrengthPoint::new(date, *x, *y)))
            .collect()
    }

    #[test]
    fn step_classifies_and_signals() {
        let mut engine = RotationEngine::new(RrgConfig::default()).unwrap();
        let (cycle, failures) = engine.step(
            day(2),
            &points(&[("XLK", 0.2, 0.1), ("XLE", -0.1, -0.1)], day(2)),
        );
        assert!(failures.is_empty());
        assert_eq!(cycle.rotations.len(), 2);
        // BTreeMap order: XLE before XLK.
        assert_eq!(cycle.rotations[0].instrument.as_str(), "XLE");
        assert_eq!(cycle.rotations[0].quadrant, Quadrant::Lagging);
        assert_eq!(cycle.rotations[1].strength, Strength::Strong);
        let kinds: Vec<SignalKind> = cycle.signals.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SignalKind::Sell, SignalKind::Buy]);
    }

    #[test]
    fn replayed_step_is_empty() {
        let mut engine = RotationEngine::new(RrgConfig::default()).unwrap();
        let batch = points(&[("XLK", 0.2, 0.1)], day(2));
        engine.step(day(2), &batch);
        let (cycle, failures) = engine.step(day(2), &batch);
        assert!(cycle.rotations.is_empty());
        assert!(cycle.signals.is_empty());
        assert!(failures.is_empty());
    }

    #[test]
    fn stale_point_is_a_failure_not_a_panic() {
        let mut engine = RotationEngine::new(RrgConfig::default()).unwrap();
        engine.step(day(3), &points(&[("XLK", 0.2, 0.1)], day(3)));
        let (cycle, failures) = engine.step(
            day(2),
            &points(&[("XLK", 0.2, 0.1), ("XLE", 0.1, 0.1)], day(2)),
        );
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].category, ErrorCategory::DataIntegrity);
        assert_eq!(cycle.rotations.len(), 1);
        assert_eq!(cycle.rotations[0].instrument.as_str(), "XLE");
    }

    #[test]
    fn point_dated_off_cycle_is_rejected() {
        let mut engine = RotationEngine::new(RrgConfig::default()).unwrap();
        let mut batch = points(&[("XLE", 0.1, 0.1)], day(2));
        batch.extend(points(&[("XLK", 0.2, 0.1)], day(9)));

        let (cycle, failures) = engine.step(day(2), &batch);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].instrument.as_str(), "XLK");
        assert_eq!(failures[0].category, ErrorCategory::DataIntegrity);
        assert!(matches!(
            failures[0].error,
            RrgError::DateMismatch { expected, actual, .. } if expected == day(2) && actual == day(9)
        ));
        assert_eq!(cycle.rotations.len(), 1);
        assert_eq!(cycle.rotations[0].instrument.as_str(), "XLE");
        assert!(cycle.signals.iter().all(|s| s.instrument.as_str() != "XLK"));

        // The rejected point left no trace, so its own date still records.
        let xlk = InstrumentId::from("XLK");
        assert_eq!(engine.tracker().last_date(&xlk), None);
        let (cycle, failures) = engine.step(day(9), &points(&[("XLK", 0.2, 0.1)], day(9)));
        assert!(failures.is_empty());
        assert_eq!(cycle.rotations.len(), 1);
    }

    struct Unsmoothed;

    impl RelativeStrengthMethod for Unsmoothed {
        fn name(&self) -> &str {
            "unsmoothed"
        }

        fn min_history(&self) -> usize {
            2
        }

        fn compute(&self, ratio: &[f64]) -> crate::relative_strength::RsSeries {
            let rs_ratio: Vec<f64> = ratio.iter().map(|r| r - 1.0).collect();
            let mut rs_momentum = vec![f64::NAN; ratio.len()];
            for i in 1..ratio.len() {
                rs_momentum[i] = rs_ratio[i] - rs_ratio[i - 1];
            }
            crate::relative_strength::RsSeries {
                rs_ratio,
                rs_momentum,
            }
        }
    }

    #[test]
    fn fingerprint_names_the_method_in_use() {
        let jdk = RotationEngine::new(RrgConfig::default()).unwrap();
        let mut custom = RotationEngine::with_method(RrgConfig::default(), Unsmoothed).unwrap();
        assert_ne!(jdk.fingerprint(), custom.fingerprint());

        // Windows that the custom method never reads leave its fingerprint alone.
        let mut config = RrgConfig::default();
        config.relative_strength.fast_window = 10;
        let retuned = RotationEngine::with_method(config, Unsmoothed).unwrap();
        assert_eq!(custom.fingerprint(), retuned.fingerprint());

        let spy = PriceSeries::from_pairs("SPY", vec![(day(2), 100.0), (day(3), 100.0)]).unwrap();
        let xlk = PriceSeries::from_pairs("XLK", vec![(day(2), 100.0), (day(3), 110.0)]).unwrap();
        let report = custom.run(&spy, &[xlk]);
        assert_eq!(report.method, "unsmoothed");
        assert_eq!(report.config_fingerprint, retuned.fingerprint());
    }

    #[test]
    fn diversification_uses_cycle_snapshot() {
        let mut config = RrgConfig::default();
        config.signals.diversification = true;
        let mut engine = RotationEngine::new(config).unwrap();
        let (cycle, _) = engine.step(
            day(2),
            &points(&[("XLK", 0.3, 0.2), ("XLF", 0.05, 0.02)], day(2)),
        );
        let by_rule: Vec<(&str, RuleId)> = cycle
            .signals
            .iter()
            .map(|s| (s.instrument.as_str(), s.rule))
            .collect();
        assert_eq!(
            by_rule,
            vec![("XLF", RuleId::Diversification), ("XLK", RuleId::LeadingStrength)]
        );
    }

    #[test]
    fn heading_appears_once_trail_is_long_enough() {
        let mut config = RrgConfig::default();
        config.analytics.heading_lookback = 2;
        let mut engine = RotationEngine::new(config).unwrap();

        let mut last = None;
        for (i, n) in (2..6).enumerate() {
            let x = -0.05 + i as f64 * 0.02;
            let (cycle, _) = engine.step(day(n), &points(&[("XLK", x, 0.01)], day(n)));
            last = Some(cycle);
            if i < 2 {
                assert!(last.as_ref().unwrap().rotations[0].heading.is_none());
            }
        }
        let heading = last.unwrap().rotations[0].heading.unwrap();
        assert_eq!(heading.historic.date, day(3));
        assert_eq!(heading.toward, Quadrant::Leading);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = RrgConfig::default();
        config.relative_strength.fast_window = 300;
        assert!(RotationEngine::new(config).is_err());
    }
}
