//! Multisets of chemical species.
//!
//! A [`Multiset`] maps species to non-negative copy numbers. It serves both as
//! the system state and as the stoichiometry of a reaction.

use std::borrow::{Borrow, Cow};
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque species identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Species(String);

impl Species {
    /// Create a species from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Species name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Species {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Species {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Species {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Species to copy-number mapping.
///
/// Zero counts are never stored, so a missing key and a count of zero are the
/// same thing and two multisets compare equal exactly when every species has
/// the same count in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<Species, u64>", into = "HashMap<Species, u64>")]
pub struct Multiset {
    counts: HashMap<Species, u64>,
}

impl Multiset {
    /// Create an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy number of `species`, zero when absent.
    #[inline]
    pub fn get(&self, species: &str) -> u64 {
        self.counts.get(species).copied().unwrap_or(0)
    }

    /// Set the count of `species`. A count of zero removes it.
    pub fn insert(&mut self, species: impl Into<Species>, count: u64) {
        let species = species.into();
        if count == 0 {
            self.counts.remove(species.as_str());
        } else {
            self.counts.insert(species, count);
        }
    }

    /// Whether `species` has a non-zero count.
    #[inline]
    pub fn contains(&self, species: &str) -> bool {
        self.counts.contains_key(species)
    }

    /// Number of distinct species present.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Iterate over `(species, count)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, Species, u64> {
        self.counts.iter()
    }
}

impl From<HashMap<Species, u64>> for Multiset {
    fn from(counts: HashMap<Species, u64>) -> Self {
        counts.into_iter().collect()
    }
}

impl From<Multiset> for HashMap<Species, u64> {
    fn from(multiset: Multiset) -> Self {
        multiset.counts
    }
}

impl<S: Into<Species>> FromIterator<(S, u64)> for Multiset {
    /// Repeated species accumulate.
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts: HashMap<Species, u64> = HashMap::new();
        for (species, count) in iter {
            if count == 0 {
                continue;
            }
            let entry = counts.entry(species.into()).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        Self { counts }
    }
}

impl<'a> IntoIterator for &'a Multiset {
    type Item = (&'a Species, &'a u64);
    type IntoIter = hash_map::Iter<'a, Species, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Errors raised when a state cannot be normalized into a [`Multiset`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("State must be a mapping of species to counts, got {0}")]
    NotAMapping(&'static str),
    #[error("Species name must be non-empty")]
    EmptySpecies,
    #[error("Count for species '{species}' is negative: {count}")]
    NegativeCount { species: String, count: i64 },
    #[error("Count for species '{species}' is not a non-negative integer: {value}")]
    InvalidCount { species: String, value: String },
}

/// Conversion of mapping-like inputs into the canonical state form.
///
/// Canonical multisets are borrowed as-is; anything else is normalized into a
/// fresh multiset and the input is left untouched.
pub trait IntoState<'a> {
    fn into_state(self) -> Result<Cow<'a, Multiset>, StateError>;
}

impl<'a> IntoState<'a> for &'a Multiset {
    fn into_state(self) -> Result<Cow<'a, Multiset>, StateError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'a, K: AsRef<str>> IntoState<'a> for &HashMap<K, i64> {
    fn into_state(self) -> Result<Cow<'a, Multiset>, StateError> {
        let mut state = Multiset::new();
        for (species, &count) in self {
            let species = species.as_ref();
            if species.is_empty() {
                return Err(StateError::EmptySpecies);
            }
            let count = u64::try_from(count).map_err(|_| StateError::NegativeCount {
                species: species.to_owned(),
                count,
            })?;
            state.insert(species, count);
        }
        Ok(Cow::Owned(state))
    }
}

impl<'a> IntoState<'a> for &serde_json::Value {
    fn into_state(self) -> Result<Cow<'a, Multiset>, StateError> {
        let object = match self {
            serde_json::Value::Object(object) => object,
            serde_json::Value::Null => return Err(StateError::NotAMapping("null")),
            serde_json::Value::Bool(_) => return Err(StateError::NotAMapping("a boolean")),
            serde_json::Value::Number(_) => return Err(StateError::NotAMapping("a number")),
            serde_json::Value::String(_) => return Err(StateError::NotAMapping("a string")),
            serde_json::Value::Array(_) => return Err(StateError::NotAMapping("an array")),
        };

        let mut state = Multiset::new();
        for (species, value) in object {
            if species.is_empty() {
                return Err(StateError::EmptySpecies);
            }
            let count = match value.as_u64() {
                Some(count) => count,
                None => {
                    return Err(match value.as_i64() {
                        Some(count) => StateError::NegativeCount {
                            species: species.clone(),
                            count,
                        },
                        None => StateError::InvalidCount {
                            species: species.clone(),
                            value: value.to_string(),
                        },
                    });
                }
            };
            state.insert(species.as_str(), count);
        }
        Ok(Cow::Owned(state))
    }
}
