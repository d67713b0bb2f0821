//! Deterministic synthetic price universes for demos and tests.
//!
//! Each symbol gets its own RNG seeded from BLAKE3(seed, symbol), so adding a
//! symbol never changes the paths of the others. Paths combine a random walk
//! with a slow sine cycle so that relative strength actually rotates.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Observation, PriceSeries};
use crate::error::RrgError;

/// Shape of a synthetic universe.
#[derive(Debug, Clone)]
pub struct SyntheticSpec {
    pub start: NaiveDate,
    /// Number of trading days (weekends are skipped).
    pub days: usize,
    pub seed: u64,
    /// Half-width of the uniform daily return.
    pub daily_range: f64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap_or_default(),
            days: 500,
            seed: 42,
            daily_range: 0.015,
        }
    }
}

/// Generate one symbol's price path.
pub fn synthetic_series(symbol: &str, spec: &SyntheticSpec) -> Result<PriceSeries, RrgError> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&spec.seed.to_le_bytes());
    hasher.update(symbol.as_bytes());
    let seed: [u8; 32] = *hasher.finalize().as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let drift: f64 = rng.gen_range(-0.0004..0.0004);
    let cycle_len: f64 = rng.gen_range(120.0..260.0);
    let cycle_amp: f64 = rng.gen_range(0.001..0.004);
    let phase: f64 = rng.gen_range(0.0..std::f64::consts::TAU);

    let mut observations = Vec::with_capacity(spec.days);
    let mut price = 100.0_f64;
    let mut current = spec.start;

    while observations.len() < spec.days {
        if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            current += chrono::Duration::days(1);
            continue;
        }

        let t = observations.len() as f64;
        let cyclical = cycle_amp * (std::f64::consts::TAU * t / cycle_len + phase).sin();
        let noise: f64 = rng.gen_range(-spec.daily_range..spec.daily_range);
        price *= 1.0 + drift + cyclical + noise;

        observations.push(Observation::new(current, price));
        current += chrono::Duration::days(1);
    }

    PriceSeries::new(symbol, observations)
}

/// Generate a path per symbol, in the given order.
pub fn synthetic_universe(
    symbols: &[&str],
    spec: &SyntheticSpec,
) -> Result<Vec<PriceSeries>, RrgError> {
    symbols.iter().map(|s| synthetic_series(s, spec)).collect()
}
