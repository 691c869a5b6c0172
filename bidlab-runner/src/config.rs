//! Serializable simulation configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for a simulation run (content-addressable hash).
pub type RunId = String;

/// Errors from reading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("period must be between 1 and 7, got {0}")]
    PeriodOutOfRange(u32),
}

/// Configuration for a single simulation run.
///
/// Captures everything needed to reproduce the run: input tables, the
/// advertiser selection, the master seed and the output location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Path to the traffic CSV (one budget period).
    pub traffic_path: PathBuf,

    /// Path to the pacing-table CSV produced by the offline trainer.
    pub pacing_path: PathBuf,

    /// Advertiser to simulate. None selects the first advertiser in the
    /// traffic file.
    #[serde(default)]
    pub advertiser: Option<u32>,

    /// Budget period index, folded into the seed schedule.
    #[serde(default = "default_period")]
    pub period: u32,

    /// Master seed for conversion sampling.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Directory for exported artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_period() -> u32 {
    7
}

fn default_seed() -> u64 {
    42
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl SimulationConfig {
    pub fn new(traffic_path: impl Into<PathBuf>, pacing_path: impl Into<PathBuf>) -> Self {
        Self {
            traffic_path: traffic_path.into(),
            pacing_path: pacing_path.into(),
            advertiser: None,
            period: default_period(),
            seed: default_seed(),
            output_dir: default_output_dir(),
        }
    }

    /// Load and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period == 0 || self.period > 7 {
            return Err(ConfigError::PeriodOutOfRange(self.period));
        }
        Ok(())
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share the same RunId, so exported
    /// artifacts land in the same directory and overwrite cleanly.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("SimulationConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        hash.to_hex().to_string()
    }
}
