//! Series provider trait and an in-memory implementation.
//!
//! The core never fetches data itself. Providers hand over validated
//! `PriceSeries`; a CSV loader, a database reader or a test fixture can all
//! sit behind the same trait.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{InstrumentId, PriceSeries};
use crate::error::RrgError;

/// Errors from a series provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("instrument not found: {0}")]
    UnknownInstrument(InstrumentId),

    #[error("invalid series: {0}")]
    InvalidSeries(#[from] RrgError),

    #[error("provider error: {0}")]
    Other(String),
}

/// Source of price history for instruments and benchmarks.
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of the source (e.g. "csv:prices.csv").
    fn name(&self) -> &str;

    /// Every instrument this provider can serve, in a stable order.
    fn instruments(&self) -> Vec<InstrumentId>;

    /// Full ordered history for one instrument.
    fn fetch(&self, instrument: &InstrumentId) -> Result<PriceSeries, ProviderError>;
}

/// Provider backed by series already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    name: String,
    series: BTreeMap<InstrumentId, PriceSeries>,
}

impl InMemoryProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series: BTreeMap::new(),
        }
    }

    /// Add or replace the series for its instrument.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.instrument().clone(), series);
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<PriceSeries> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = PriceSeries>>(iter: I) -> Self {
        let mut provider = InMemoryProvider::new("memory");
        for series in iter {
            provider.insert(series);
        }
        provider
    }
}

impl SeriesProvider for InMemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn instruments(&self) -> Vec<InstrumentId> {
        self.series.keys().cloned().collect()
    }

    fn fetch(&self, instrument: &InstrumentId) -> Result<PriceSeries, ProviderError> {
        self.series
            .get(instrument)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownInstrument(instrument.clone()))
    }
}
