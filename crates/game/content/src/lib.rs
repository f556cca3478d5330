//! Data-driven content definitions and loaders.
//!
//! This crate turns the RON/TOML files under `data/` into the values
//! `game-core` runs on:
//! - Ability, consumable and enemy catalogs (RON), merged into a [`game_core::Registry`]
//! - Level layouts: occupancy grid, player spawn and enemy spawns (RON)
//! - Game configuration (TOML)
//!
//! Effects are code and always come from [`game_core::Registry::with_builtin_effects`];
//! data files only tune the numbers around them.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, ConsumableLoader, ContentFactory, EnemyLoader, EnemySpawn, Level,
    LevelLoader, PlayerSpawn,
};

/// Directory holding the data files shipped with this crate.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
