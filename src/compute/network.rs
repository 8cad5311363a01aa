//! Propensity vectors over a whole reaction network.

use std::collections::HashSet;

use log::{debug, trace};
use rayon::prelude::*;

use crate::schema::{ConfigError, MassAction, Multiset, NetworkConfig};

use super::propensity;

/// A named reaction channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub name: String,
    pub reaction: MassAction,
}

/// Ordered set of reaction channels sharing one state.
#[derive(Debug, Clone)]
pub struct ReactionNetwork {
    channels: Vec<Channel>,
    parallel_threshold: usize,
}

impl ReactionNetwork {
    /// Build a network from validated channels.
    pub fn new(channels: Vec<Channel>, parallel_threshold: usize) -> Result<Self, NetworkError> {
        if parallel_threshold == 0 {
            return Err(NetworkError::InvalidParallelThreshold);
        }

        let mut seen = HashSet::with_capacity(channels.len());
        for channel in &channels {
            if !seen.insert(channel.name.as_str()) {
                return Err(NetworkError::DuplicateChannel(channel.name.clone()));
            }
        }

        debug!(
            "Built reaction network with {} channels (parallel from {})",
            channels.len(),
            parallel_threshold
        );

        Ok(Self {
            channels,
            parallel_threshold,
        })
    }

    /// Build a network from configuration. Unnamed channels become `R{index}`.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let channels = config
            .reactions
            .iter()
            .enumerate()
            .map(|(index, reaction)| -> Result<Channel, ConfigError> {
                let built = reaction
                    .build()
                    .map_err(|source| ConfigError::InvalidReaction { index, source })?;
                Ok(Channel {
                    name: reaction.name.clone().unwrap_or_else(|| format!("R{index}")),
                    reaction: built,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::new(channels, config.parallel_threshold)
    }

    /// Reaction channels, in evaluation order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Propensity of every channel in `state`, in channel order.
    pub fn propensities(&self, state: &Multiset) -> Vec<f64> {
        if self.channels.len() >= self.parallel_threshold {
            trace!("Evaluating {} channels in parallel", self.channels.len());
            self.channels
                .par_iter()
                .map(|c| propensity(&c.reaction, state))
                .collect()
        } else {
            self.channels
                .iter()
                .map(|c| propensity(&c.reaction, state))
                .collect()
        }
    }

    /// Sum of all channel propensities. Infinite if any channel is.
    pub fn total_propensity(&self, state: &Multiset) -> f64 {
        self.propensities(state).iter().sum()
    }
}

/// Network construction errors.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Invalid network config: {0}")]
    Config(#[from] ConfigError),
    #[error("Duplicate channel name '{0}'")]
    DuplicateChannel(String),
    #[error("Parallel threshold must be non-zero")]
    InvalidParallelThreshold,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ReactionConfig, ReactionError};

    fn channel(name: &str, constant: f64, reactants: &[(&str, u64)]) -> Channel {
        Channel {
            name: name.to_string(),
            reaction: MassAction::new(constant, reactants.iter().copied().collect()).unwrap(),
        }
    }

    fn sample_channels() -> Vec<Channel> {
        vec![
            channel("dimerization", 1.0, &[("A", 2)]),
            channel("binding", 2.0, &[("A", 1), ("B", 2)]),
            channel("production", 0.5, &[]),
            channel("decay", 0.1, &[("C", 1)]),
        ]
    }

    #[test]
    fn test_propensities_in_channel_order() {
        let network = ReactionNetwork::new(sample_channels(), 64).unwrap();
        let state: Multiset = [("A", 4), ("B", 6)].into_iter().collect();

        assert_eq!(network.propensities(&state), vec![6.0, 120.0, 0.5, 0.0]);
        assert_eq!(network.total_propensity(&state), 126.5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let channels: Vec<Channel> = (0..200)
            .map(|i| channel(&format!("r{i}"), 0.01 * i as f64, &[("A", 1 + i % 3)]))
            .collect();
        let state: Multiset = [("A", 30)].into_iter().collect();

        let sequential = ReactionNetwork::new(channels.clone(), 1_000).unwrap();
        let parallel = ReactionNetwork::new(channels, 1).unwrap();

        assert_eq!(sequential.propensities(&state), parallel.propensities(&state));
    }

    #[test]
    fn test_total_with_instantaneous_channel() {
        let mut channels = sample_channels();
        channels.push(channel("flash", f64::INFINITY, &[("Z", 1)]));
        let network = ReactionNetwork::new(channels, 64).unwrap();

        assert_eq!(network.total_propensity(&Multiset::new()), f64::INFINITY);
    }

    #[test]
    fn test_duplicate_channel_names() {
        let channels = vec![channel("a", 1.0, &[]), channel("a", 2.0, &[])];
        assert!(matches!(
            ReactionNetwork::new(channels, 64),
            Err(NetworkError::DuplicateChannel(name)) if name == "a"
        ));
    }

    #[test]
    fn test_from_config_default_names() {
        let config = NetworkConfig {
            reactions: vec![
                ReactionConfig {
                    constant: Some(1.0),
                    reactants: Some(Default::default()),
                    ..ReactionConfig::default()
                },
                ReactionConfig {
                    name: Some("named".to_string()),
                    constant: Some(1.0),
                    reactants: Some(Default::default()),
                },
            ],
            ..NetworkConfig::default()
        };

        let network = ReactionNetwork::from_config(&config).unwrap();
        let names: Vec<&str> = network.channels().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["R0", "named"]);
    }

    #[test]
    fn test_from_config_malformed_reaction() {
        let config = NetworkConfig {
            reactions: vec![ReactionConfig {
                constant: Some(1.0),
                ..ReactionConfig::default()
            }],
            ..NetworkConfig::default()
        };

        assert!(matches!(
            ReactionNetwork::from_config(&config),
            Err(NetworkError::Config(ConfigError::InvalidReaction {
                index: 0,
                source: ReactionError::MissingReactants
            }))
        ));
    }

    #[test]
    fn test_default_config_network() {
        let config = NetworkConfig::default();
        let network = ReactionNetwork::from_config(&config).unwrap();
        assert_eq!(network.len(), 3);
        assert_eq!(network.propensities(&config.state), vec![6.0, 120.0, 0.5]);
    }

    #[test]
    fn test_empty_network() {
        let network = ReactionNetwork::new(Vec::new(), 64).unwrap();
        assert!(network.is_empty());
        assert_eq!(network.total_propensity(&Multiset::new()), 0.0);
    }
}
