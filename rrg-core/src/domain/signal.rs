//! Signal records: the terminal output of the engine.
//!
//! Signals are immutable once emitted and carry the rule that produced them.
//! The engine keeps no copy after handing them to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::InstrumentId;

/// Recommendation carried by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
    StopLoss,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalKind::Buy => "Buy",
            SignalKind::Sell => "Sell",
            SignalKind::Hold => "Hold",
            SignalKind::StopLoss => "StopLoss",
        };
        f.write_str(s)
    }
}

/// Identifier of the rule that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Current quadrant is Leading.
    LeadingStrength,
    /// Current quadrant is Lagging.
    LaggingWeakness,
    /// Weakening → Leading.
    MomentumReacceleration,
    /// Lagging → Improving.
    EarlyRecovery,
    /// Leading → Weakening.
    TakeProfit,
    /// Leading → Weakening or Lagging.
    StopLoss,
    /// A Buy held back because another instrument owns the quadrant's slot.
    Diversification,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::LeadingStrength => "leading_strength",
            RuleId::LaggingWeakness => "lagging_weakness",
            RuleId::MomentumReacceleration => "momentum_reacceleration",
            RuleId::EarlyRecovery => "early_recovery",
            RuleId::TakeProfit => "take_profit",
            RuleId::StopLoss => "stop_loss",
            RuleId::Diversification => "diversification",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommendation for one instrument at one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub date: NaiveDate,
    pub instrument: InstrumentId,
    pub kind: SignalKind,
    pub rule: RuleId,
}
