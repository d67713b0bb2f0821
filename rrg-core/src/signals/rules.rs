//! The fixed, ordered rule table.

use crate::domain::{Quadrant, RuleId, SignalKind, Transition};

/// When a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The current quadrant equals the given one.
    CurrentIs(Quadrant),
    /// The last transition is exactly `from → to`.
    TransitionIs { from: Quadrant, to: Quadrant },
    /// The last transition leaves `from` into any of `to`.
    TransitionFrom {
        from: Quadrant,
        to: &'static [Quadrant],
    },
}

impl Condition {
    pub fn matches(&self, current: Quadrant, transition: Option<Transition>) -> bool {
        match *self {
            Condition::CurrentIs(q) => current == q,
            Condition::TransitionIs { from, to } => {
                transition.is_some_and(|t| t.from == from && t.to == to)
            }
            Condition::TransitionFrom { from, to } => {
                transition.is_some_and(|t| t.from == from && to.contains(&t.to))
            }
        }
    }

    pub fn needs_transition(&self) -> bool {
        !matches!(self, Condition::CurrentIs(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleId,
    pub kind: SignalKind,
    pub condition: Condition,
}

/// Evaluated in this order; every match is reported.
pub static RULES: [Rule; 6] = [
    Rule {
        id: RuleId::LeadingStrength,
        kind: SignalKind::Buy,
        condition: Condition::CurrentIs(Quadrant::Leading),
    },
    Rule {
        id: RuleId::LaggingWeakness,
        kind: SignalKind::Sell,
        condition: Condition::CurrentIs(Quadrant::Lagging),
    },
    Rule {
        id: RuleId::MomentumReacceleration,
        kind: SignalKind::Buy,
        condition: Condition::TransitionIs {
            from: Quadrant::Weakening,
            to: Quadrant::Leading,
        },
    },
    Rule {
        id: RuleId::EarlyRecovery,
        kind: SignalKind::Buy,
        condition: Condition::TransitionIs {
            from: Quadrant::Lagging,
            to: Quadrant::Improving,
        },
    },
    Rule {
        id: RuleId::TakeProfit,
        kind: SignalKind::Sell,
        condition: Condition::TransitionIs {
            from: Quadrant::Leading,
            to: Quadrant::Weakening,
        },
    },
    Rule {
        id: RuleId::StopLoss,
        kind: SignalKind::StopLoss,
        condition: Condition::TransitionFrom {
            from: Quadrant::Leading,
            to: &[Quadrant::Weakening, Quadrant::Lagging],
        },
    },
];
