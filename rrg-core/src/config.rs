//! Engine configuration, loaded from TOML.
//!
//! Every section and field has a default, so an empty file is a valid config:
//!
//! ```toml
//! [relative_strength]
//! fast_window = 50
//! slow_window = 200
//! momentum_window = 20
//!
//! [classifier]
//! zero_policy = "treat_as_positive"
//!
//! [signals]
//! diversification = false
//!
//! [analytics]
//! strength_radius = 0.1
//! heading_lookback = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classifier::ZeroPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrgConfig {
    pub relative_strength: RelativeStrengthConfig,
    pub classifier: ClassifierConfig,
    pub signals: SignalConfig,
    pub analytics: AnalyticsConfig,
}

/// Smoothing windows of the JdK relative strength method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeStrengthConfig {
    pub fast_window: usize,
    pub slow_window: usize,
    pub momentum_window: usize,
}

impl Default for RelativeStrengthConfig {
    fn default() -> Self {
        Self {
            fast_window: 50,
            slow_window: 200,
            momentum_window: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub zero_policy: ZeroPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// At most one instrument per quadrant may carry Buy signals per date.
    pub diversification: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Points within this distance of the origin are graded Weak.
    pub strength_radius: f64,
    /// How many points back the heading looks.
    pub heading_lookback: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            strength_radius: 0.1,
            heading_lookback: 5,
        }
    }
}

impl RrgConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RrgConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rs = &self.relative_strength;
        if rs.fast_window == 0 || rs.slow_window == 0 || rs.momentum_window == 0 {
            return Err(ConfigError::Invalid(
                "relative_strength windows must be >= 1".into(),
            ));
        }
        if rs.fast_window >= rs.slow_window {
            return Err(ConfigError::Invalid(format!(
                "fast_window ({}) must be shorter than slow_window ({})",
                rs.fast_window, rs.slow_window
            )));
        }

        let analytics = &self.analytics;
        if !analytics.strength_radius.is_finite() || analytics.strength_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "strength_radius must be a non-negative number, got {}",
                analytics.strength_radius
            )));
        }
        if analytics.heading_lookback == 0 {
            return Err(ConfigError::Invalid("heading_lookback must be >= 1".into()));
        }

        Ok(())
    }

    /// BLAKE3 hash of the canonical JSON form.
    ///
    /// Two reports with the same fingerprint were produced by the same settings.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        blake3::hash(&canonical).to_hex().to_string()
    }

    /// Fingerprint of a run that used `method` for relative strength.
    ///
    /// The method name stands in for the `relative_strength` section: the
    /// JdK name carries its three windows, and a custom method never reads
    /// that section.
    pub fn run_fingerprint(&self, method: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        for section in [
            serde_json::to_vec(&self.classifier),
            serde_json::to_vec(&self.signals),
            serde_json::to_vec(&self.analytics),
        ] {
            hasher.update(&section.unwrap_or_default());
        }
        hasher.update(method.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}
