//! Instrument/benchmark time alignment.
//!
//! Only dates present in both series survive. Missing dates are skipped,
//! never interpolated or forward-filled.

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::domain::PriceSeries;

/// Instrument and benchmark prices on their shared dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPair {
    /// Shared date axis (strictly increasing).
    pub dates: Vec<NaiveDate>,
    /// Instrument prices, same length as `dates`.
    pub instrument: Vec<f64>,
    /// Benchmark prices, same length as `dates`.
    pub benchmark: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Instrument price divided by benchmark price, per shared date.
    pub fn price_ratio(&self) -> Vec<f64> {
        self.instrument
            .iter()
            .zip(&self.benchmark)
            .map(|(p, b)| p / b)
            .collect()
    }
}

/// Intersect two validated series on their dates.
///
/// Both inputs are strictly increasing, so a single merge pass suffices.
pub fn align_pair(instrument: &PriceSeries, benchmark: &PriceSeries) -> AlignedPair {
    let a = instrument.observations();
    let b = benchmark.observations();
    let mut out = AlignedPair::default();

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].date.cmp(&b[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.dates.push(a[i].date);
                out.instrument.push(a[i].price);
                out.benchmark.push(b[j].price);
                i += 1;
                j += 1;
            }
        }
    }

    out
}
