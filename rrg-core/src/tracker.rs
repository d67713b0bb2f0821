//! Rotation tracking: per-instrument, append-only quadrant history.
//!
//! Each instrument owns its own `QuadrantHistory`; nothing is shared between
//! instruments. Dates must be strictly increasing. Re-submitting the last
//! recorded date is a no-op (re-delivery), an earlier date is an error and
//! leaves the history untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::classifier::QuadrantClassifier;
use crate::domain::{InstrumentId, Quadrant, RelativeStrengthPoint, Transition};
use crate::error::RrgError;

/// Result of [`RotationTracker::extend`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendOutcome {
    /// Entries newly added to the history, in date order.
    pub appended: Vec<HistoryEntry>,
    /// Points that could not be recorded.
    pub failures: Vec<(NaiveDate, RrgError)>,
}

impl ExtendOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One classified date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub quadrant: Quadrant,
}

/// Result of an append attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// The date equals the last recorded one; nothing changed.
    AlreadyRecorded,
}

/// Ordered quadrant history of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantHistory {
    instrument: InstrumentId,
    entries: Vec<HistoryEntry>,
}

impl QuadrantHistory {
    pub fn new(instrument: InstrumentId) -> Self {
        Self {
            instrument,
            entries: Vec::new(),
        }
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|e| e.date)
    }

    /// Last recorded quadrant, `None` while the history is empty.
    pub fn current(&self) -> Option<Quadrant> {
        self.last().map(|e| e.quadrant)
    }

    /// Transition between the last two entries. Purely positional.
    pub fn last_transition(&self) -> Option<Transition> {
        match self.entries.as_slice() {
            [.., prev, curr] => Some(Transition::new(prev.quadrant, curr.quadrant)),
            _ => None,
        }
    }

    /// Transition into the entry at `index` (from `index - 1`).
    pub fn transition_at(&self, index: usize) -> Option<Transition> {
        let curr = self.entries.get(index)?;
        let prev = self.entries.get(index.checked_sub(1)?)?;
        Some(Transition::new(prev.quadrant, curr.quadrant))
    }

    /// Every actual change of quadrant, with the date it happened.
    pub fn rotations(&self) -> Vec<(NaiveDate, Transition)> {
        self.entries
            .windows(2)
            .map(|w| (w[1].date, Transition::new(w[0].quadrant, w[1].quadrant)))
            .filter(|(_, t)| t.is_rotation())
            .collect()
    }

    pub fn append(
        &mut self,
        date: NaiveDate,
        quadrant: Quadrant,
    ) -> Result<AppendOutcome, RrgError> {
        self.check_date(date)?;
        if self.last_date() == Some(date) {
            return Ok(AppendOutcome::AlreadyRecorded);
        }
        self.entries.push(HistoryEntry { date, quadrant });
        Ok(AppendOutcome::Appended)
    }

    fn check_date(&self, date: NaiveDate) -> Result<(), RrgError> {
        match self.last_date() {
            Some(last) if date < last => Err(RrgError::OutOfOrderObservation {
                instrument: self.instrument.clone(),
                date,
                last,
            }),
            _ => Ok(()),
        }
    }
}

/// Quadrant histories for a universe of instruments.
#[derive(Debug, Clone, Default)]
pub struct RotationTracker {
    classifier: QuadrantClassifier,
    histories: BTreeMap<InstrumentId, QuadrantHistory>,
}

impl RotationTracker {
    pub fn new(classifier: QuadrantClassifier) -> Self {
        Self {
            classifier,
            histories: BTreeMap::new(),
        }
    }

    pub fn classifier(&self) -> &QuadrantClassifier {
        &self.classifier
    }

    /// Classify `point` and append it to the instrument's history.
    ///
    /// The date is checked before classification, so a replayed date never
    /// fails on an unresolved zero boundary.
    pub fn record(
        &mut self,
        instrument: &InstrumentId,
        point: &RelativeStrengthPoint,
    ) -> Result<AppendOutcome, RrgError> {
        if let Some(history) = self.histories.get(instrument) {
            history.check_date(point.date)?;
            if history.last_date() == Some(point.date) {
                trace!(%instrument, date = %point.date, "re-delivered point ignored");
                return Ok(AppendOutcome::AlreadyRecorded);
            }
        }
        let quadrant = self.classifier.classify(point)?;
        self.append(instrument, point.date, quadrant)
    }

    /// Append an already-classified entry.
    pub fn append(
        &mut self,
        instrument: &InstrumentId,
        date: NaiveDate,
        quadrant: Quadrant,
    ) -> Result<AppendOutcome, RrgError> {
        self.histories
            .entry(instrument.clone())
            .or_insert_with(|| QuadrantHistory::new(instrument.clone()))
            .append(date, quadrant)
    }

    /// Record a recomputed series, skipping the prefix already in history.
    ///
    /// A failing point is reported and skipped; later points are still
    /// recorded, so one bad date never freezes the history.
    pub fn extend(
        &mut self,
        instrument: &InstrumentId,
        points: &[RelativeStrengthPoint],
    ) -> ExtendOutcome {
        let last = self.last_date(instrument);
        let mut outcome = ExtendOutcome::default();
        for point in points.iter().filter(|p| last.map_or(true, |l| p.date > l)) {
            match self.record(instrument, point) {
                Ok(AppendOutcome::Appended) => outcome
                    .appended
                    .extend(self.histories.get(instrument).and_then(|h| h.last()).copied()),
                Ok(AppendOutcome::AlreadyRecorded) => {}
                Err(error) => {
                    debug!(%instrument, date = %point.date, %error, "point skipped");
                    outcome.failures.push((point.date, error));
                }
            }
        }
        outcome
    }

    pub fn history(&self, instrument: &InstrumentId) -> Option<&QuadrantHistory> {
        self.histories.get(instrument)
    }

    pub fn current(&self, instrument: &InstrumentId) -> Option<Quadrant> {
        self.histories.get(instrument).and_then(|h| h.current())
    }

    pub fn last_transition(&self, instrument: &InstrumentId) -> Option<Transition> {
        self.histories.get(instrument).and_then(|h| h.last_transition())
    }

    pub fn last_date(&self, instrument: &InstrumentId) -> Option<NaiveDate> {
        self.histories.get(instrument).and_then(|h| h.last_date())
    }

    pub fn instruments(&self) -> impl Iterator<Item = &InstrumentId> {
        self.histories.keys()
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}
