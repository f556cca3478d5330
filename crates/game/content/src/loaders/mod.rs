//! Content loaders for reading game data from files.
//!
//! Each loader reads one file format into game-core types; [`ContentFactory`]
//! knows where the files live inside a data directory.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod level;

pub use catalog::{AbilityLoader, ConsumableLoader, EnemyLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use level::{EnemySpawn, Level, LevelLoader, PlayerSpawn};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
