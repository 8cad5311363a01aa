//! Mass-action reaction propensities for stochastic simulation.
//!
//! Given a reaction's rate constant and reactant stoichiometry, and the current
//! copy number of every species, this crate computes the instantaneous rate at
//! which the reaction fires, as consumed by Gillespie-style stochastic
//! simulation algorithms.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Species, multisets, reaction descriptors and network configuration
//! - `compute`: Numerical computation (binomial coefficients, propensities, networks)
//!
//! Evaluation is pure: descriptors and states are only read, so a descriptor can
//! be shared across threads and evaluated against independent states.
//!
//! # Example
//!
//! ```rust
//! use mass_action::{MassAction, Multiset};
//!
//! // 2 A -> ... at rate constant 1.0
//! let reactants: Multiset = [("A", 2)].into_iter().collect();
//! let reaction = MassAction::new(1.0, reactants).unwrap();
//!
//! let state: Multiset = [("A", 5)].into_iter().collect();
//! assert_eq!(reaction.propensity(&state), 10.0);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{PropensityError, ReactionNetwork, choose, propensity};
pub use schema::{MassAction, Multiset, NetworkConfig, ReactionConfig, Species};
