//! Price data plumbing: alignment, providers, synthetic universes.

pub mod align;
pub mod provider;
pub mod synthetic;

pub use align::{align_pair, AlignedPair};
pub use provider::{InMemoryProvider, ProviderError, SeriesProvider};
pub use synthetic::{synthetic_series, synthetic_universe, SyntheticSpec};
