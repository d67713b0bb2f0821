//! Rotation heading: where an instrument is moving on the RRG plane.
//!
//! The segment from a historic point to the current point is extended by its
//! own length past the current point. The direction of that segment, read as
//! a sign pair, names the quadrant the instrument is heading toward.

use serde::{Deserialize, Serialize};

use crate::domain::{Quadrant, RelativeStrengthPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub historic: RelativeStrengthPoint,
    /// Direction of travel in radians, `atan2(Δmomentum, Δratio)`.
    pub angle: f64,
    /// Distance travelled from the historic point.
    pub length: f64,
    pub projected_ratio: f64,
    pub projected_momentum: f64,
    /// Quadrant of the direction vector (zero counts as positive).
    pub toward: Quadrant,
}

impl Heading {
    pub fn between(historic: &RelativeStrengthPoint, current: &RelativeStrengthPoint) -> Self {
        let dx = current.rs_ratio - historic.rs_ratio;
        let dy = current.rs_momentum - historic.rs_momentum;
        let angle = dy.atan2(dx);
        let length = dx.hypot(dy);

        Self {
            historic: *historic,
            angle,
            length,
            projected_ratio: current.rs_ratio + length * angle.cos(),
            projected_momentum: current.rs_momentum + length * angle.sin(),
            toward: Quadrant::from_signs(dx >= 0.0, dy >= 0.0),
        }
    }

    /// Heading from `trail[len - 1 - lookback]` to the last point.
    ///
    /// `None` when the trail is not longer than `lookback`.
    pub fn from_trail(trail: &[RelativeStrengthPoint], lookback: usize) -> Option<Self> {
        let current = trail.last()?;
        let historic = trail.len().checked_sub(lookback + 1).map(|i| &trail[i])?;
        Some(Self::between(historic, current))
    }
}
