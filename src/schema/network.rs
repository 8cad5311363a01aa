//! Configuration for a reaction network evaluated against a single state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Multiset, ReactionConfig, ReactionError};

/// Default channel count from which propensities are evaluated in parallel.
fn default_parallel_threshold() -> usize {
    64
}

/// Top-level network configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Reaction channels, in output order.
    pub reactions: Vec<ReactionConfig>,
    /// Species copy numbers to evaluate against.
    #[serde(default)]
    pub state: Multiset,
    /// Evaluate in parallel once the network has at least this many channels.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let dimerization = ReactionConfig {
            name: Some("dimerization".to_string()),
            constant: Some(1.0),
            reactants: Some([("A".into(), 2)].into_iter().collect()),
        };
        let binding = ReactionConfig {
            name: Some("binding".to_string()),
            constant: Some(2.0),
            reactants: Some([("A".into(), 1), ("B".into(), 2)].into_iter().collect()),
        };
        let production = ReactionConfig {
            name: Some("production".to_string()),
            constant: Some(0.5),
            reactants: Some(Default::default()),
        };

        Self {
            reactions: vec![dimerization, binding, production],
            state: [("A", 4), ("B", 6)].into_iter().collect(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl NetworkConfig {
    /// Parse a configuration from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_threshold == 0 {
            return Err(ConfigError::InvalidParallelThreshold);
        }
        for (index, reaction) in self.reactions.iter().enumerate() {
            reaction
                .build()
                .map_err(|source| ConfigError::InvalidReaction { index, source })?;
        }
        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parallel threshold must be non-zero")]
    InvalidParallelThreshold,
    #[error("Reaction {index} is malformed: {source}")]
    InvalidReaction {
        index: usize,
        source: ReactionError,
    },
}
