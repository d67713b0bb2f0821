//! Relative strength: RS-Ratio and RS-Momentum per instrument versus a benchmark.
//!
//! The calculator owns alignment and the history check. The normalization
//! itself is a pluggable [`RelativeStrengthMethod`]; the only fixed contract
//! is the sign convention (positive = outperforming / improving).

pub mod jdk;

pub use jdk::JdkRelativeStrength;

use crate::data::align_pair;
use crate::domain::{PriceSeries, RelativeStrengthPoint};
use crate::error::RrgError;

/// RS-Ratio and RS-Momentum series, same length as the input ratio series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RsSeries {
    pub rs_ratio: Vec<f64>,
    pub rs_momentum: Vec<f64>,
}

/// Normalization strategy turning a price-ratio series into RS values.
///
/// Implementations must be causal: output at index t may only use
/// `ratio[..=t]`. Warm-up values are `f64::NAN`.
pub trait RelativeStrengthMethod: Send + Sync {
    fn name(&self) -> &str;

    /// Minimum number of aligned observations needed to emit at least one point.
    fn min_history(&self) -> usize;

    fn compute(&self, ratio: &[f64]) -> RsSeries;
}

/// Turns instrument + benchmark prices into dated RS points.
pub struct RelativeStrengthCalculator {
    method: Box<dyn RelativeStrengthMethod>,
}

impl RelativeStrengthCalculator {
    pub fn new(method: impl RelativeStrengthMethod + 'static) -> Self {
        Self {
            method: Box::new(method),
        }
    }

    pub fn method(&self) -> &dyn RelativeStrengthMethod {
        self.method.as_ref()
    }

    /// One point per shared date past the method's warm-up.
    ///
    /// Fails with `InsufficientHistory` when the aligned series is shorter
    /// than `min_history()`.
    pub fn calculate(
        &self,
        instrument: &PriceSeries,
        benchmark: &PriceSeries,
    ) -> Result<Vec<RelativeStrengthPoint>, RrgError> {
        let aligned = align_pair(instrument, benchmark);
        let required = self.method.min_history();
        if aligned.len() < required {
            return Err(RrgError::InsufficientHistory {
                instrument: instrument.instrument().clone(),
                required,
                available: aligned.len(),
            });
        }

        let rs = self.method.compute(&aligned.price_ratio());

        let points = aligned
            .dates
            .iter()
            .zip(rs.rs_ratio.iter().zip(&rs.rs_momentum))
            .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
            .map(|(date, (x, y))| RelativeStrengthPoint::new(*date, *x, *y))
            .collect();

        Ok(points)
    }
}

impl Default for RelativeStrengthCalculator {
    fn default() -> Self {
        Self::new(JdkRelativeStrength::default())
    }
}

impl std::fmt::Debug for RelativeStrengthCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelativeStrengthCalculator")
            .field("method", &self.method.name())
            .finish()
    }
}
