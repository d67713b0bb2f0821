//! JdK-style RS-Ratio / RS-Momentum.
//!
//! rs_ratio[t]    = SMA_fast(ratio)[t] / SMA_slow(ratio)[t] - 1
//! rs_momentum[t] = rs_ratio[t] - rs_ratio[t - momentum_window]
//!
//! First defined point at index `slow - 1 + momentum`.

use super::{RelativeStrengthMethod, RsSeries};
use crate::config::RelativeStrengthConfig;
use crate::indicators::{Indicator, Momentum, Sma};

#[derive(Debug, Clone)]
pub struct JdkRelativeStrength {
    fast: Sma,
    slow: Sma,
    momentum: Momentum,
    name: String,
}

impl JdkRelativeStrength {
    /// # Panics
    ///
    /// Panics if `fast_window >= slow_window` or any window is zero.
    /// [`RrgConfig::validate`](crate::config::RrgConfig::validate) rejects
    /// both, so configs that pass validation are safe to build from.
    pub fn new(fast_window: usize, slow_window: usize, momentum_window: usize) -> Self {
        assert!(
            fast_window < slow_window,
            "fast window must be shorter than slow window"
        );
        Self {
            fast: Sma::new(fast_window),
            slow: Sma::new(slow_window),
            momentum: Momentum::new(momentum_window),
            name: format!("jdk_rs_{fast_window}_{slow_window}_{momentum_window}"),
        }
    }

    /// # Panics
    ///
    /// Same conditions as [`JdkRelativeStrength::new`].
    pub fn from_config(config: &RelativeStrengthConfig) -> Self {
        Self::new(
            config.fast_window,
            config.slow_window,
            config.momentum_window,
        )
    }
}

impl Default for JdkRelativeStrength {
    fn default() -> Self {
        Self::from_config(&RelativeStrengthConfig::default())
    }
}

impl RelativeStrengthMethod for JdkRelativeStrength {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_history(&self) -> usize {
        self.slow.period() + self.momentum.lookback()
    }

    fn compute(&self, ratio: &[f64]) -> RsSeries {
        let fast = self.fast.compute(ratio);
        let slow = self.slow.compute(ratio);

        let rs_ratio: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f / s - 1.0).collect();
        let rs_momentum = self.momentum.compute(&rs_ratio);

        RsSeries {
            rs_ratio,
            rs_momentum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn first_point_lands_after_slow_plus_momentum_warmup() {
        let method = JdkRelativeStrength::new(2, 4, 3);
        assert_eq!(method.min_history(), 7);

        let ratio: Vec<f64> = (0..10).map(|i| 1.0 + i as f64 * 0.01).collect();
        let rs = method.compute(&ratio);

        for i in 0..3 {
            assert!(rs.rs_ratio[i].is_nan(), "rs_ratio warm-up at {i}");
        }
        assert!(rs.rs_ratio[3].is_finite());
        for i in 0..6 {
            assert!(rs.rs_momentum[i].is_nan(), "rs_momentum warm-up at {i}");
        }
        assert!(rs.rs_momentum[6].is_finite());
    }

    #[test]
    fn rising_ratio_is_leading() {
        // Accelerating ratio: fast MA above slow MA, and the gap widens.
        let method = JdkRelativeStrength::new(2, 4, 1);
        let ratio: Vec<f64> = (0..8).map(|i| 1.0 + (i as f64).powi(2) * 0.01).collect();
        let rs = method.compute(&ratio);

        assert!(rs.rs_ratio[7] > 0.0);
        assert!(rs.rs_momentum[7] > 0.0);
    }

    #[test]
    fn falling_ratio_is_underperforming() {
        let method = JdkRelativeStrength::new(2, 4, 1);
        let ratio: Vec<f64> = (0..8).map(|i| 1.0 - i as f64 * 0.02).collect();
        let rs = method.compute(&ratio);
        assert!(rs.rs_ratio[7] < 0.0);
    }

    #[test]
    fn hand_computed_values() {
        let method = JdkRelativeStrength::new(1, 2, 1);
        let rs = method.compute(&[1.0, 1.1, 1.21]);
        // t=1: 1.1 / 1.05 - 1
        assert_approx(rs.rs_ratio[1], 1.1 / 1.05 - 1.0, DEFAULT_EPSILON);
        // t=2: 1.21 / 1.155 - 1
        assert_approx(rs.rs_ratio[2], 1.21 / 1.155 - 1.0, DEFAULT_EPSILON);
        assert_approx(
            rs.rs_momentum[2],
            (1.21 / 1.155 - 1.0) - (1.1 / 1.05 - 1.0),
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn default_windows_match_config_defaults() {
        let method = JdkRelativeStrength::default();
        assert_eq!(method.name(), "jdk_rs_50_200_20");
        assert_eq!(method.min_history(), 220);
    }

    #[test]
    #[should_panic(expected = "fast window must be shorter than slow window")]
    fn equal_fast_and_slow_windows_panic() {
        JdkRelativeStrength::new(20, 20, 5);
    }

    #[test]
    #[should_panic(expected = "Momentum period must be >= 1")]
    fn zero_momentum_window_panics() {
        JdkRelativeStrength::new(2, 4, 0);
    }
}
