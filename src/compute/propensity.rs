//! Mass-action propensity evaluation.
//!
//! The propensity of a reaction with rate constant `c` and reactant
//! stoichiometry `{s_i: k_i}` in a state with copy numbers `n_i` is
//!
//! ```text
//! a = c * Π C(n_i, k_i)
//! ```
//!
//! Two cases short-circuit before the product is formed, in this order:
//!
//! 1. A reaction without reactants fires at its bare rate constant, whatever
//!    the state (even an empty one).
//! 2. A reaction with an infinite rate constant has infinite propensity, even
//!    when its reactants are missing.
//!
//! A species absent from the state counts as zero copies. Its factor is then
//! `C(0, k) = 0` and so is the propensity. Shortfalls are not errors.

use crate::schema::{IntoState, MassAction, Multiset, ReactionError, StateError};

use super::choose_f64;

/// Errors raised when a propensity cannot be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropensityError {
    #[error("Malformed reaction: {0}")]
    MalformedReaction(#[from] ReactionError),
    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),
}

/// Propensity of `reaction` in `state`.
pub fn propensity(reaction: &MassAction, state: &Multiset) -> f64 {
    if reaction.is_constitutive() {
        return reaction.constant();
    }
    if reaction.is_instantaneous() {
        return f64::INFINITY;
    }

    // A zero factor wins over an overflowed (infinite) one.
    let mut a = reaction.constant();
    if a == 0.0 {
        return 0.0;
    }
    for (species, &required) in reaction.reactants() {
        let ways = choose_f64(state.get(species.as_str()), required);
        if ways == 0.0 {
            return 0.0;
        }
        a *= ways;
    }
    a
}

impl MassAction {
    /// Propensity of this reaction in `state`.
    #[inline]
    pub fn propensity(&self, state: &Multiset) -> f64 {
        propensity(self, state)
    }

    /// Propensity for a state in any form accepted by [`IntoState`].
    ///
    /// The input is normalized first; it is never modified.
    pub fn propensity_of<'a>(&self, state: impl IntoState<'a>) -> Result<f64, PropensityError> {
        let state = state.into_state()?;
        Ok(propensity(self, &state))
    }
}
