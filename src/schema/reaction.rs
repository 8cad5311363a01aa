//! Mass-action reaction descriptors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Multiset, Species};

/// Raw reaction description as found in configuration files.
///
/// Fields are optional so that a missing constant or reactant table is
/// reported by [`ReactionConfig::build`] rather than as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionConfig {
    /// Channel name. Defaults to `R{index}` inside a network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stochastic rate constant. `inf` marks an instantaneous channel.
    #[serde(default, with = "rate_constant")]
    pub constant: Option<f64>,
    /// Reactant species and their stoichiometric coefficients.
    #[serde(default)]
    pub reactants: Option<HashMap<Species, u64>>,
}

impl ReactionConfig {
    /// Validate and convert into a [`MassAction`] descriptor.
    pub fn build(&self) -> Result<MassAction, ReactionError> {
        let constant = self.constant.ok_or(ReactionError::MissingConstant)?;
        let reactants = self
            .reactants
            .as_ref()
            .ok_or(ReactionError::MissingReactants)?;

        if let Some((species, _)) = reactants.iter().find(|&(_, &n)| n == 0) {
            return Err(ReactionError::ZeroCoefficient {
                species: species.to_string(),
            });
        }

        MassAction::new(constant, reactants.clone().into())
    }
}

impl From<&MassAction> for ReactionConfig {
    fn from(reaction: &MassAction) -> Self {
        Self {
            name: None,
            constant: Some(reaction.constant),
            reactants: Some(reaction.reactants.clone().into()),
        }
    }
}

/// A reaction channel under mass-action kinetics.
///
/// Only the reactant side matters for the propensity; products belong to the
/// simulation engine that fires the reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct MassAction {
    constant: f64,
    reactants: Multiset,
}

impl MassAction {
    /// Create a descriptor, rejecting NaN and negative rate constants.
    ///
    /// Positive infinity is accepted.
    pub fn new(constant: f64, reactants: Multiset) -> Result<Self, ReactionError> {
        if constant.is_nan() {
            return Err(ReactionError::NanConstant);
        }
        if constant < 0.0 {
            return Err(ReactionError::NegativeConstant(constant));
        }
        Ok(Self {
            constant,
            reactants,
        })
    }

    /// Rate constant.
    #[inline]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Reactant stoichiometry. Every coefficient is at least 1.
    #[inline]
    pub fn reactants(&self) -> &Multiset {
        &self.reactants
    }

    /// Reaction order: the total number of reactant molecules consumed.
    pub fn order(&self) -> u64 {
        self.reactants.total()
    }

    /// Whether the reaction needs no reactants at all.
    #[inline]
    pub fn is_constitutive(&self) -> bool {
        self.reactants.is_empty()
    }

    /// Whether the rate constant is infinite.
    #[inline]
    pub fn is_instantaneous(&self) -> bool {
        self.constant == f64::INFINITY
    }
}

/// Reaction descriptor validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReactionError {
    #[error("Reaction has no rate constant")]
    MissingConstant,
    #[error("Reaction has no reactant mapping")]
    MissingReactants,
    #[error("Rate constant must not be NaN")]
    NanConstant,
    #[error("Rate constant must be non-negative, got {0}")]
    NegativeConstant(f64),
    #[error("Stoichiometric coefficient for species '{species}' must be at least 1")]
    ZeroCoefficient { species: String },
}

/// JSON has no literal for infinity, so the rate constant also accepts the
/// strings `"inf"`, `"+inf"`, `"infinity"` and writes infinity as `"inf"`.
mod rate_constant {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if v.is_infinite() && *v > 0.0 => serializer.serialize_str("inf"),
            other => other.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(v)) => Ok(Some(v)),
            Some(Raw::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "inf" | "+inf" | "infinity" | "+infinity" => Ok(Some(f64::INFINITY)),
                other => other
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("invalid rate constant '{text}'"))),
            },
        }
    }
}
