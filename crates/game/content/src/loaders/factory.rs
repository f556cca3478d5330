//! Content factory for building the registry and levels from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, Registry};

use crate::loaders::{
    AbilityLoader, ConfigLoader, ConsumableLoader, EnemyLoader, Level, LevelLoader, LoadResult,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── consumables.ron
/// ├── enemies.ron
/// └── levels/
///     ├── crypt.ron
///     └── ...
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Build a registry from the built-in effects and the three catalogs.
    ///
    /// Kinds missing from a catalog stay unregistered; using them later
    /// surfaces as a `RegistryError`.
    pub fn load_registry(&self) -> LoadResult<Registry> {
        let mut registry = Registry::with_builtin_effects();

        for (kind, definition) in AbilityLoader::load(&self.data_dir.join("abilities.ron"))? {
            registry.register_ability(kind, definition);
        }
        for (kind, definition) in ConsumableLoader::load(&self.data_dir.join("consumables.ron"))? {
            registry.register_consumable(kind, definition);
        }
        for (kind, definition) in EnemyLoader::load(&self.data_dir.join("enemies.ron"))? {
            registry.register_enemy(kind, definition);
        }

        Ok(registry)
    }

    /// Load a level from `levels/{level_name}.ron`.
    pub fn load_level(&self, level_name: &str) -> LoadResult<Level> {
        let path = self
            .data_dir
            .join("levels")
            .join(format!("{}.ron", level_name));
        LevelLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
