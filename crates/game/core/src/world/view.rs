//! Per-tick read-only snapshot handed to enemy minds.

use crate::grid::OccupancyGrid;
use crate::navigation::CollisionOracle;
use crate::state::{Enemy, EnemyKind, EntityId, PlayerState, Rect, ResourceMeter, Vec2};

/// What minds may know about the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    pub rect: Rect,
    pub health: ResourceMeter,
    pub invisible: bool,
}

impl PlayerView {
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// What minds may know about an enemy, their own included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub health: ResourceMeter,
}

/// World state as it was at the start of the enemy phase.
///
/// Captured once per tick before any mind runs, so every mind sees the same
/// positions and health no matter what the minds before it decided.
#[derive(Clone, Debug)]
pub struct WorldView<'a> {
    grid: &'a OccupancyGrid,
    cell_size: f32,
    player: PlayerView,
    enemies: Vec<EnemyView>,
}

impl<'a> WorldView<'a> {
    pub fn capture(
        grid: &'a OccupancyGrid,
        cell_size: f32,
        player: &PlayerState,
        enemies: &[Enemy],
    ) -> Self {
        Self {
            grid,
            cell_size,
            player: PlayerView {
                rect: player.entity.rect(),
                health: player.health,
                invisible: player.is_invisible(),
            },
            enemies: enemies
                .iter()
                .map(|enemy| EnemyView {
                    id: enemy.id,
                    kind: enemy.kind,
                    rect: enemy.entity.rect(),
                    health: enemy.health,
                })
                .collect(),
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        self.grid
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn player(&self) -> &PlayerView {
        &self.player
    }

    pub fn enemies(&self) -> &[EnemyView] {
        &self.enemies
    }
}

impl CollisionOracle for WorldView<'_> {
    /// Terrain, the player and every other enemy are obstacles.
    fn collides(&self, rect: &Rect, ignore: EntityId) -> bool {
        self.grid.rect_blocked(rect, self.cell_size)
            || (!ignore.is_player() && self.player.rect.intersects(rect))
            || self
                .enemies
                .iter()
                .any(|enemy| enemy.id != ignore && enemy.rect.intersects(rect))
    }
}
