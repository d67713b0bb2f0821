use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::RelativeStrengthPoint;

/// Grade of a point by its distance from the RRG origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    /// On or inside the radius.
    Weak,
    /// Outside the radius.
    Strong,
}

impl Strength {
    pub fn grade(point: &RelativeStrengthPoint, radius: f64) -> Self {
        if point.distance() <= radius {
            Strength::Weak
        } else {
            Strength::Strong
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => f.write_str("Weak"),
            Strength::Strong => f.write_str("Strong"),
        }
    }
}
