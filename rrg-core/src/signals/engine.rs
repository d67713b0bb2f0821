//! Signal engine: evaluates the rule table for one instrument at one date.
//!
//! Rules are independent: every matching rule yields a signal, in table order,
//! with no deduplication or prioritization. The same inputs always produce the
//! same signals in the same order.

use chrono::NaiveDate;
use tracing::debug;

use super::rules::{Rule, RULES};
use super::snapshot::{SnapshotEntry, UniverseSnapshot};
use crate::config::SignalConfig;
use crate::domain::{InstrumentId, Quadrant, RuleId, Signal, SignalKind, Transition};
use crate::tracker::RotationTracker;

/// State of one instrument at the date being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub instrument: &'a InstrumentId,
    pub date: NaiveDate,
    pub current: Quadrant,
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    diversification: bool,
}

impl SignalEngine {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            diversification: config.diversification,
        }
    }

    pub fn with_diversification(mut self, enabled: bool) -> Self {
        self.diversification = enabled;
        self
    }

    pub fn diversification(&self) -> bool {
        self.diversification
    }

    pub fn rules(&self) -> &'static [Rule] {
        &RULES
    }

    /// Rules matching a quadrant and transition, in table order.
    pub fn matching_rules(
        current: Quadrant,
        transition: Option<Transition>,
    ) -> impl Iterator<Item = &'static Rule> {
        RULES
            .iter()
            .filter(move |rule| rule.condition.matches(current, transition))
    }

    /// Evaluate every rule for `ctx`.
    ///
    /// With diversification enabled, an instrument that is not the designated
    /// buyer of its quadrant in `universe` has its Buy signals replaced by a
    /// single Hold. Sell and StopLoss signals are never touched.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>, universe: &UniverseSnapshot) -> Vec<Signal> {
        let mut signals: Vec<Signal> = Self::matching_rules(ctx.current, ctx.transition)
            .map(|rule| Signal {
                date: ctx.date,
                instrument: ctx.instrument.clone(),
                kind: rule.kind,
                rule: rule.id,
            })
            .collect();

        if !self.diversification {
            return signals;
        }

        let Some(first_buy) = signals.iter().position(|s| s.kind == SignalKind::Buy) else {
            return signals;
        };

        let designated = designated_buyer(universe, ctx.current);
        if designated.map_or(true, |id| id == ctx.instrument) {
            return signals;
        }

        debug!(
            instrument = %ctx.instrument,
            date = %ctx.date,
            quadrant = %ctx.current,
            held_for = ?designated.map(|id| id.as_str()),
            "buy held back by diversification"
        );

        signals[first_buy] = Signal {
            date: ctx.date,
            instrument: ctx.instrument.clone(),
            kind: SignalKind::Hold,
            rule: RuleId::Diversification,
        };
        let mut index = 0;
        signals.retain(|s| {
            let keep = index == first_buy || s.kind != SignalKind::Buy;
            index += 1;
            keep
        });
        signals
    }

    /// Evaluate from the tracker's latest state. Empty when the instrument
    /// has no history yet.
    pub fn evaluate_latest(
        &self,
        tracker: &RotationTracker,
        instrument: &InstrumentId,
        universe: &UniverseSnapshot,
    ) -> Vec<Signal> {
        let Some(last) = tracker.history(instrument).and_then(|h| h.last()) else {
            return Vec::new();
        };
        let ctx = EvaluationContext {
            instrument,
            date: last.date,
            current: last.quadrant,
            transition: tracker.last_transition(instrument),
        };
        self.evaluate(&ctx, universe)
    }
}

fn yields_buy(entry: &SnapshotEntry) -> bool {
    SignalEngine::matching_rules(entry.quadrant, entry.transition)
        .any(|rule| rule.kind == SignalKind::Buy)
}

/// The one instrument allowed to carry Buy signals in `quadrant`: greatest
/// distance from the origin, earliest instrument id on ties.
fn designated_buyer(universe: &UniverseSnapshot, quadrant: Quadrant) -> Option<&InstrumentId> {
    universe
        .iter()
        .filter(|(_, e)| e.quadrant == quadrant && yields_buy(e))
        .fold(None, |best: Option<(&InstrumentId, f64)>, (id, e)| match best {
            Some((_, d)) if e.distance <= d => best,
            _ => Some((id, e.distance)),
        })
        .map(|(id, _)| id)
}
