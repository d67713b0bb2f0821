//! Domain types for the rotation engine.

pub mod instrument;
pub mod observation;
pub mod point;
pub mod quadrant;
pub mod signal;

pub use instrument::InstrumentId;
pub use observation::{Observation, PriceSeries};
pub use point::RelativeStrengthPoint;
pub use quadrant::{Quadrant, Transition};
pub use signal::{RuleId, Signal, SignalKind};
