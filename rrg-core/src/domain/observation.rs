//! Observation: the fundamental price input, and the validated series built from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::InstrumentId;
use crate::error::RrgError;

/// A single dated price for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub price: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Usable price: finite and strictly positive.
    pub fn is_sane(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// Ordered price history for one instrument.
///
/// Construction enforces the series invariant: dates strictly increasing (no
/// duplicates) and every price sane. The series is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    instrument: InstrumentId,
    observations: Vec<Observation>,
}

impl PriceSeries {
    pub fn new(
        instrument: impl Into<InstrumentId>,
        observations: Vec<Observation>,
    ) -> Result<Self, RrgError> {
        let instrument = instrument.into();

        for obs in &observations {
            if !obs.is_sane() {
                return Err(RrgError::InvalidPrice {
                    instrument,
                    date: obs.date,
                    price: obs.price,
                });
            }
        }

        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(RrgError::OutOfOrderObservation {
                    instrument,
                    date: pair[1].date,
                    last: pair[0].date,
                });
            }
        }

        Ok(Self {
            instrument,
            observations,
        })
    }

    /// Build from `(date, price)` pairs.
    pub fn from_pairs(
        instrument: impl Into<InstrumentId>,
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, RrgError> {
        let observations = pairs
            .into_iter()
            .map(|(date, price)| Observation::new(date, price))
            .collect();
        Self::new(instrument, observations)
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}
