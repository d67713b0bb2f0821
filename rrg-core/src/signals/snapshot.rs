//! Read-only view of the whole universe at one evaluation cycle.
//!
//! Built after every instrument's quadrant has been updated for the cycle and
//! never mutated while signals are evaluated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{InstrumentId, Quadrant, Transition};
use crate::tracker::RotationTracker;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub quadrant: Quadrant,
    pub transition: Option<Transition>,
    /// Distance from the RRG origin; ranks competing Buy candidates.
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniverseSnapshot {
    entries: BTreeMap<InstrumentId, SnapshotEntry>,
}

impl UniverseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quadrant and transition of every tracked instrument.
    ///
    /// The tracker holds no coordinates, so every distance is zero and
    /// diversification ties fall back to instrument order.
    pub fn from_tracker(tracker: &RotationTracker) -> Self {
        let entries = tracker
            .instruments()
            .filter_map(|id| {
                let history = tracker.history(id)?;
                Some((
                    id.clone(),
                    SnapshotEntry {
                        quadrant: history.current()?,
                        transition: history.last_transition(),
                        distance: 0.0,
                    },
                ))
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, instrument: InstrumentId, entry: SnapshotEntry) {
        self.entries.insert(instrument, entry);
    }

    pub fn get(&self, instrument: &InstrumentId) -> Option<&SnapshotEntry> {
        self.entries.get(instrument)
    }

    pub fn quadrant(&self, instrument: &InstrumentId) -> Option<Quadrant> {
        self.get(instrument).map(|e| e.quadrant)
    }

    /// Entries in instrument order.
    pub fn iter(&self) -> impl Iterator<Item = (&InstrumentId, &SnapshotEntry)> {
        self.entries.iter()
    }

    /// Instruments currently in `quadrant`, in instrument order.
    pub fn members(&self, quadrant: Quadrant) -> Vec<&InstrumentId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.quadrant == quadrant)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
