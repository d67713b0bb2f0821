//! Momentum: difference over a lookback, not a percentage.
//!
//! momentum[t] = value[t] - value[t-period]
//! Lookback: period.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    name: String,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        Self {
            period,
            name: format!("momentum_{period}"),
        }
    }
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        for i in self.period..n {
            // NaN on either side propagates through the subtraction.
            result[i] = values[i] - values[i - self.period];
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn momentum_basic() {
        let result = Momentum::new(2).compute(&[100.0, 110.0, 105.0, 115.0]);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 5.0, DEFAULT_EPSILON);
        assert_approx(result[3], 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_negative() {
        let result = Momentum::new(1).compute(&[0.02, -0.01]);
        assert_approx(result[1], -0.03, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_nan_propagation() {
        let result = Momentum::new(1).compute(&[f64::NAN, 0.1, 0.2]);
        assert!(result[1].is_nan());
        assert_approx(result[2], 0.1, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_lookback() {
        assert_eq!(Momentum::new(20).lookback(), 20);
    }
}
