use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// RS-Ratio and RS-Momentum of one instrument at one date.
///
/// Both values are centred on zero: positive RS-Ratio means the instrument is
/// outperforming its benchmark, positive RS-Momentum means that relative
/// performance is improving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeStrengthPoint {
    pub date: NaiveDate,
    pub rs_ratio: f64,
    pub rs_momentum: f64,
}

impl RelativeStrengthPoint {
    pub fn new(date: NaiveDate, rs_ratio: f64, rs_momentum: f64) -> Self {
        Self {
            date,
            rs_ratio,
            rs_momentum,
        }
    }

    /// Euclidean distance from the RRG origin.
    pub fn distance(&self) -> f64 {
        self.rs_ratio.hypot(self.rs_momentum)
    }
}
