//! Quadrants of the relative rotation graph and transitions between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four RRG regimes.
///
/// Normal rotation is clockwise: Leading → Weakening → Lagging → Improving → Leading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// RS-Ratio > 0, RS-Momentum > 0.
    Leading,
    /// RS-Ratio < 0, RS-Momentum > 0.
    Improving,
    /// RS-Ratio < 0, RS-Momentum < 0.
    Lagging,
    /// RS-Ratio > 0, RS-Momentum < 0.
    Weakening,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Leading,
        Quadrant::Improving,
        Quadrant::Lagging,
        Quadrant::Weakening,
    ];

    /// Quadrant for a pair of resolved signs (`true` = positive side).
    pub fn from_signs(ratio_positive: bool, momentum_positive: bool) -> Self {
        match (ratio_positive, momentum_positive) {
            (true, true) => Quadrant::Leading,
            (false, true) => Quadrant::Improving,
            (false, false) => Quadrant::Lagging,
            (true, false) => Quadrant::Weakening,
        }
    }

    /// The quadrant a clockwise rotation moves into next.
    pub fn clockwise_next(self) -> Self {
        match self {
            Quadrant::Leading => Quadrant::Weakening,
            Quadrant::Weakening => Quadrant::Lagging,
            Quadrant::Lagging => Quadrant::Improving,
            Quadrant::Improving => Quadrant::Leading,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::Leading => "Leading",
            Quadrant::Improving => "Improving",
            Quadrant::Lagging => "Lagging",
            Quadrant::Weakening => "Weakening",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change between two consecutive history entries of one instrument.
///
/// A transition is derived, never stored. `from == to` is a valid transition
/// (the instrument stayed put); use [`Transition::is_rotation`] to test for an
/// actual change of quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: Quadrant,
    pub to: Quadrant,
}

impl Transition {
    pub fn new(from: Quadrant, to: Quadrant) -> Self {
        Self { from, to }
    }

    pub fn is_rotation(&self) -> bool {
        self.from != self.to
    }

    /// True when the move follows the usual clockwise path.
    pub fn is_clockwise(&self) -> bool {
        self.is_rotation() && self.from.clockwise_next() == self.to
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}
