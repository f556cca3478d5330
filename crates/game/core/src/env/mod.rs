//! Static definitions and the registry that holds them.
//!
//! Definitions are read-only after startup. The [`Registry`] bundles them
//! with the effect function tables so the pipelines can resolve a tag to its
//! numbers and its behavior in one place.
mod abilities;
mod consumables;
mod enemies;
mod error;
mod registry;
mod rng;

pub use abilities::AbilityDefinition;
pub use consumables::ConsumableDefinition;
pub use enemies::EnemyDefinition;
pub use error::RegistryError;
pub use registry::Registry;
pub use rng::{PcgRng, RngOracle};
