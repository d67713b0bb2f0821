//! Rolling indicators over plain value series.
//!
//! Indicators are pure functions: series in, same-length series out, with
//! `f64::NAN` for the first `lookback()` values. No value at index t may
//! depend on input beyond t.

pub mod momentum;
pub mod sma;

pub use momentum::Momentum;
pub use sma::Sma;

/// Trait for indicators over a single value series.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g. "sma_50", "momentum_20").
    fn name(&self) -> &str;

    /// Number of leading values that are `NaN` in the output.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
