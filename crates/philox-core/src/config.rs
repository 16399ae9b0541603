//! Generator configuration.
//!
//! Configuration is read from TOML, typically a `philox.toml` next to the
//! caller's project:
//!
//! ```toml
//! seed = 42
//! offset = 0
//!
//! [distribution]
//! type = "uniform-int"
//! low = 0
//! high = 10
//!
//! [fill]
//! parallel_threshold = 65536
//! blocks_per_shard = 1024
//! ```

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::distributions::DistributionKind;
use crate::rng::PhiloxEngine;
use crate::{PhiloxError, Result};

/// Controls how [`crate::fill`] splits work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Minimum estimated work (blocks times element cost) before fills run in parallel.
    pub parallel_threshold: usize,
    /// Number of blocks each parallel shard generates.
    pub blocks_per_shard: usize,
}

impl FillConfig {
    /// Never run in parallel.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.blocks_per_shard == 0 {
            return Err(PhiloxError::InvalidParameter(
                "blocks_per_shard must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1 << 16,
            blocks_per_shard: 1024,
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the key. A fresh seed is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Starting offset (upper 64 bits of the counter).
    pub offset: u64,
    /// Distribution used when generating samples.
    pub distribution: DistributionKind,
    /// Fill partitioning.
    pub fill: FillConfig,
}

impl GeneratorConfig {
    /// Parse a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| PhiloxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading generator config from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PhiloxError::Config(e.to_string()))
    }

    /// Check distribution parameters and fill settings.
    pub fn validate(&self) -> Result<()> {
        self.distribution
            .validate()
            .map_err(|e| PhiloxError::Config(e.to_string()))?;
        self.fill
            .validate()
            .map_err(|e| PhiloxError::Config(e.to_string()))
    }

    /// The configured seed, or a freshly drawn one.
    ///
    /// Draws from the thread RNG when no seed is set, so the caller should
    /// record the returned value if the stream needs to be reproduced.
    pub fn resolved_seed(&self) -> i64 {
        self.seed.unwrap_or_else(|| {
            let seed = rand::thread_rng().gen();
            info!("No seed configured, drew seed {}", seed);
            seed
        })
    }

    /// Build an engine at the configured seed and offset.
    pub fn engine(&self) -> PhiloxEngine {
        PhiloxEngine::new(self.resolved_seed(), self.offset)
    }
}
