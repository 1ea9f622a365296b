//! Training configuration.

use pairwise_core::{PairwiseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pair frequencies are maintained between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Recount every pair and rebuild the vocabulary on each iteration.
    #[default]
    Rebuild,
    /// Keep a pair index and only re-tally words touched by a merge.
    Incremental,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rebuild => f.write_str("rebuild"),
            Strategy::Incremental => f.write_str("incremental"),
        }
    }
}

impl FromStr for Strategy {
    type Err = PairwiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rebuild" => Ok(Strategy::Rebuild),
            "incremental" => Ok(Strategy::Incremental),
            other => Err(PairwiseError::InvalidConfig(format!(
                "unknown strategy '{}', expected 'rebuild' or 'incremental'",
                other
            ))),
        }
    }
}

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Maximum number of merge iterations
    pub max_iterations: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
    /// Whether to fan pair counting and merging out over threads
    pub parallel: bool,
    /// Pair accounting strategy
    pub strategy: Strategy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            min_frequency: 1,
            parallel: false,
            strategy: Strategy::Rebuild,
        }
    }
}

impl TrainingConfig {
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::new()
    }

    /// Check the configuration before training starts.
    pub fn validate(&self) -> Result<()> {
        if self.min_frequency == 0 {
            return Err(PairwiseError::InvalidConfig(
                "min_frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one read from a file.
    pub fn from_config(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Set the maximum number of merge iterations.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Enable or disable parallel counting and merging.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the pair accounting strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
