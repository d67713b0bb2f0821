//! RRG Core: relative rotation classification and signal generation.
//!
//! This crate turns price series into rotation signals:
//! - Relative strength (RS-Ratio / RS-Momentum) of each instrument versus a benchmark
//! - Quadrant classification with an explicit zero-boundary policy
//! - Per-instrument quadrant history and transition detection
//! - A fixed rule table mapping quadrants and transitions to signals
//! - Strength grading and heading on the RRG plane
//! - A rotation engine that runs whole universes date by date

pub mod analytics;
pub mod classifier;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod relative_strength;
pub mod signals;
pub mod tracker;

pub use classifier::{QuadrantClassifier, ZeroPolicy};
pub use config::{ConfigError, RrgConfig};
pub use engine::{CycleReport, InstrumentFailure, InstrumentRotation, RotationEngine, RunReport};
pub use error::{ErrorCategory, RrgError};
pub use tracker::{ExtendOutcome, QuadrantHistory, RotationTracker};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types shared across rayon workers are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::RelativeStrengthPoint>();
        require_sync::<domain::RelativeStrengthPoint>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();

        // State
        require_send::<RotationTracker>();
        require_sync::<RotationTracker>();
        require_send::<signals::UniverseSnapshot>();
        require_sync::<signals::UniverseSnapshot>();
        require_send::<signals::SignalEngine>();
        require_sync::<signals::SignalEngine>();

        // Pipeline
        require_send::<relative_strength::RelativeStrengthCalculator>();
        require_sync::<relative_strength::RelativeStrengthCalculator>();
        require_send::<RotationEngine>();
        require_sync::<RotationEngine>();
        require_send::<RunReport>();
        require_sync::<RunReport>();
    }

    /// Rules only see one instrument's quadrant and transition. The universe
    /// reaches the signal engine through the snapshot argument alone.
    #[test]
    fn rules_have_no_universe_access() {
        fn _check(
            condition: &signals::Condition,
            current: domain::Quadrant,
            transition: Option<domain::Transition>,
        ) -> bool {
            condition.matches(current, transition)
        }
    }

    #[test]
    fn provider_is_object_safe() {
        fn _check(provider: &dyn data::SeriesProvider) -> Vec<domain::InstrumentId> {
            provider.instruments()
        }
    }
}
