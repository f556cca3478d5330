//! Definition catalog loaders (abilities, consumables, enemies).
//!
//! Every catalog is a RON struct holding a list of `(kind, definition)` pairs.
//! A kind listed twice is rejected instead of silently overwritten.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

use game_core::{
    AbilityDefinition, AbilityKind, ConsumableDefinition, ConsumableKind, EnemyDefinition,
    EnemyKind,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<(AbilityKind, AbilityDefinition)>,
}

/// Consumable catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableCatalog {
    pub consumables: Vec<(ConsumableKind, ConsumableDefinition)>,
}

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<(EnemyKind, EnemyDefinition)>,
}

/// Loader for ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load ability definitions from a RON file containing an [`AbilityCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<(AbilityKind, AbilityDefinition)>> {
        let content = read_file(path)?;
        let catalog: AbilityCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        ensure_unique("ability", &catalog.abilities)?;
        Ok(catalog.abilities)
    }
}

/// Loader for consumable catalog from RON files.
pub struct ConsumableLoader;

impl ConsumableLoader {
    /// Load consumable definitions from a RON file containing a [`ConsumableCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<(ConsumableKind, ConsumableDefinition)>> {
        let content = read_file(path)?;
        let catalog: ConsumableCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse consumable catalog RON: {}", e))?;

        ensure_unique("consumable", &catalog.consumables)?;
        Ok(catalog.consumables)
    }
}

/// Loader for enemy catalog from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy definitions from a RON file containing an [`EnemyCatalog`].
    ///
    /// Enemies without health or with a non-positive size are rejected: they
    /// would die on spawn or never collide with anything.
    pub fn load(path: &Path) -> LoadResult<Vec<(EnemyKind, EnemyDefinition)>> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        ensure_unique("enemy", &catalog.enemies)?;
        for (kind, definition) in &catalog.enemies {
            if definition.health == 0 {
                anyhow::bail!("Enemy '{}' has zero health", kind);
            }
            if definition.size.w <= 0.0 || definition.size.h <= 0.0 {
                anyhow::bail!("Enemy '{}' has a non-positive size", kind);
            }
        }
        Ok(catalog.enemies)
    }
}

fn ensure_unique<K, D>(what: &str, entries: &[(K, D)]) -> LoadResult<()>
where
    K: Copy + Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    for (kind, _) in entries {
        if !seen.insert(*kind) {
            anyhow::bail!("Duplicate {} definition for '{}'", what, kind);
        }
    }
    Ok(())
}
