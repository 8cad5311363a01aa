//! Schema module - Species, multisets, reaction descriptors and network configuration.

mod multiset;
mod network;
mod reaction;

pub use multiset::*;
pub use network::*;
pub use reaction::*;
