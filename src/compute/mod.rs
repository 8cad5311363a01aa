//! Compute module - Combinatorics and propensity evaluation.

mod choose;
mod network;
mod propensity;

pub use choose::*;
pub use network::*;
pub use propensity::*;
