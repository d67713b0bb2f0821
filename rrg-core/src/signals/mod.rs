//! Signal generation from quadrant membership and transitions.
//!
//! Rules see only one instrument's current quadrant and last transition. The
//! universe snapshot is passed in explicitly and only the diversification
//! policy reads it.

pub mod engine;
pub mod rules;
pub mod snapshot;

pub use engine::{EvaluationContext, SignalEngine};
pub use rules::{Condition, Rule, RULES};
pub use snapshot::{SnapshotEntry, UniverseSnapshot};
