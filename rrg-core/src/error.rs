//! Error taxonomy for the rotation core.
//!
//! Every failure is local to one instrument at one date. Callers use
//! [`RrgError::category`] to tell "not enough data yet" apart from a data
//! integrity violation or an unresolved classification policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::InstrumentId;

/// Errors raised by the relative strength, classification and tracking layers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RrgError {
    #[error("insufficient history for '{instrument}': {available} aligned observations, {required} required")]
    InsufficientHistory {
        instrument: InstrumentId,
        required: usize,
        available: usize,
    },

    #[error("out-of-order observation for '{instrument}': {date} is not after {last}")]
    OutOfOrderObservation {
        instrument: InstrumentId,
        date: NaiveDate,
        last: NaiveDate,
    },

    #[error("point for '{instrument}' is dated {actual}, cycle date is {expected}")]
    DateMismatch {
        instrument: InstrumentId,
        expected: NaiveDate,
        actual: NaiveDate,
    },

    #[error("invalid price {price} for '{instrument}' on {date}")]
    InvalidPrice {
        instrument: InstrumentId,
        date: NaiveDate,
        price: f64,
    },

    #[error("undefined classification for rs_ratio={rs_ratio}, rs_momentum={rs_momentum}")]
    UndefinedClassification { rs_ratio: f64, rs_momentum: f64 },
}

/// Coarse user-facing grouping of [`RrgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Recoverable by supplying more history.
    NotEnoughData,
    /// Input violates ordering or value invariants.
    DataIntegrity,
    /// A zero boundary hit under the `reject` policy, or a non-finite value.
    ClassificationPolicy,
}

impl RrgError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientHistory { .. } => ErrorCategory::NotEnoughData,
            Self::OutOfOrderObservation { .. }
            | Self::DateMismatch { .. }
            | Self::InvalidPrice { .. } => ErrorCategory::DataIntegrity,
            Self::UndefinedClassification { .. } => ErrorCategory::ClassificationPolicy,
        }
    }
}
