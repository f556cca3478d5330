//! Level loader.
//!
//! A level file carries the occupancy grid (rows of 0/1, 1 = blocked), the
//! player's spawn and loadout, and where each enemy starts. Positions are
//! given in cells and converted to world units with the configured cell size.

use std::path::Path;

use game_core::{
    AbilityKind, Cell, ConsumableKind, EnemyKind, GameConfig, OccupancyGrid, PlayerState,
    ResourceMeter, Size, SpriteId, Vec2, WorldEntity,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    name: String,
    grid: Vec<Vec<u8>>,
    player: PlayerSpawn,
    #[serde(default)]
    enemies: Vec<EnemySpawn>,
}

/// Player spawn point, body and starting loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub cell: Cell,
    pub size: Size,
    /// World units per millisecond.
    pub speed: f32,
    pub sprite: SpriteId,
    pub health: u32,
    pub mana: u32,
    #[serde(default)]
    pub abilities: Vec<AbilityKind>,
    #[serde(default)]
    pub inventory: Vec<ConsumableKind>,
}

impl PlayerSpawn {
    /// Builds the player at full health and mana.
    pub fn build(&self, cell_size: f32) -> PlayerState {
        let entity = WorldEntity::new(
            self.cell.origin(cell_size),
            self.size,
            self.speed,
            self.sprite,
        );
        let mut player = PlayerState::new(
            entity,
            ResourceMeter::full(self.health),
            ResourceMeter::full(self.mana),
        );
        for ability in &self.abilities {
            player.unlock(*ability);
        }
        for item in &self.inventory {
            player.inventory.add(*item);
        }
        player
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub cell: Cell,
}

impl EnemySpawn {
    /// World-space top-left corner of the spawn cell.
    pub fn position(&self, cell_size: f32) -> Vec2 {
        self.cell.origin(cell_size)
    }
}

/// A validated level, ready to be turned into a world.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub grid: OccupancyGrid,
    pub player: PlayerSpawn,
    pub enemies: Vec<EnemySpawn>,
}

/// Loader for levels from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level from a RON file.
    ///
    /// Rejects ragged or non-0/1 grids, spawns on blocked or out-of-bounds
    /// cells, and loadouts larger than the player can carry.
    pub fn load(path: &Path) -> LoadResult<Level> {
        let content = read_file(path)?;
        let data: LevelRon = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;

        let grid = OccupancyGrid::from_rows(&data.grid)
            .map_err(|e| anyhow::anyhow!("Invalid grid in level '{}': {}", data.name, e))?;

        if grid.is_blocked(data.player.cell) {
            anyhow::bail!(
                "Player spawn ({}, {}) in level '{}' is blocked or out of bounds",
                data.player.cell.x,
                data.player.cell.y,
                data.name
            );
        }
        if data.player.inventory.len() > GameConfig::MAX_INVENTORY_SLOTS {
            anyhow::bail!(
                "Level '{}' starts the player with {} items, at most {} fit",
                data.name,
                data.player.inventory.len(),
                GameConfig::MAX_INVENTORY_SLOTS
            );
        }
        if data.player.abilities.len() > GameConfig::MAX_UNLOCKED_ABILITIES {
            anyhow::bail!(
                "Level '{}' unlocks {} abilities, at most {} are supported",
                data.name,
                data.player.abilities.len(),
                GameConfig::MAX_UNLOCKED_ABILITIES
            );
        }
        for spawn in &data.enemies {
            if grid.is_blocked(spawn.cell) {
                anyhow::bail!(
                    "Spawn of '{}' at ({}, {}) in level '{}' is blocked or out of bounds",
                    spawn.kind,
                    spawn.cell.x,
                    spawn.cell.y,
                    data.name
                );
            }
        }

        Ok(Level {
            name: data.name,
            grid,
            player: data.player,
            enemies: data.enemies,
        })
    }
}
