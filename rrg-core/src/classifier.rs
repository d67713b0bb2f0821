//! Quadrant classification from the sign pair (RS-Ratio, RS-Momentum).
//!
//! | RS-Ratio | RS-Momentum | Quadrant  |
//! |----------|-------------|-----------|
//! | > 0      | > 0         | Leading   |
//! | < 0      | > 0         | Improving |
//! | < 0      | < 0         | Lagging   |
//! | > 0      | < 0         | Weakening |
//!
//! An exact zero on either axis is resolved by the configured [`ZeroPolicy`].

use serde::{Deserialize, Serialize};

use crate::domain::{Quadrant, RelativeStrengthPoint};
use crate::error::RrgError;

/// How an exact zero on either axis is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPolicy {
    /// Zero counts as positive (`>= 0`).
    #[default]
    TreatAsPositive,
    /// Zero counts as negative (`<= 0`).
    TreatAsNegative,
    /// Zero fails with `UndefinedClassification`.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantClassifier {
    policy: ZeroPolicy,
}

impl QuadrantClassifier {
    pub fn new(policy: ZeroPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ZeroPolicy {
        self.policy
    }

    pub fn classify(&self, point: &RelativeStrengthPoint) -> Result<Quadrant, RrgError> {
        self.classify_values(point.rs_ratio, point.rs_momentum)
    }

    /// Classify a raw (x, y) pair. Non-finite values are always rejected.
    pub fn classify_values(&self, rs_ratio: f64, rs_momentum: f64) -> Result<Quadrant, RrgError> {
        let undefined = || RrgError::UndefinedClassification {
            rs_ratio,
            rs_momentum,
        };

        let ratio_positive = self.resolve_sign(rs_ratio).ok_or_else(undefined)?;
        let momentum_positive = self.resolve_sign(rs_momentum).ok_or_else(undefined)?;

        Ok(Quadrant::from_signs(ratio_positive, momentum_positive))
    }

    fn resolve_sign(&self, value: f64) -> Option<bool> {
        if !value.is_finite() {
            return None;
        }
        if value != 0.0 {
            return Some(value > 0.0);
        }
        match self.policy {
            ZeroPolicy::TreatAsPositive => Some(true),
            ZeroPolicy::TreatAsNegative => Some(false),
            ZeroPolicy::Reject => None,
        }
    }
}
