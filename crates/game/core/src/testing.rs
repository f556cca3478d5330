//! Fixtures shared by unit tests.

use std::sync::Arc;

use crate::config::GameConfig;
use crate::grid::OccupancyGrid;
use crate::mind::{Mind, MindKind};
use crate::state::{
    Enemy, EnemyKind, EntityId, PlayerState, ResourceMeter, Size, SpriteId, Vec2, WorldEntity,
};

/// Player at (64, 64) with 100 health and 50 mana.
pub(crate) fn player() -> PlayerState {
    PlayerState::new(
        WorldEntity::new(Vec2::new(64.0, 64.0), Size::new(24.0, 24.0), 0.2, SpriteId(1)),
        ResourceMeter::full(100),
        ResourceMeter::full(50),
    )
}

/// 20x20 melee enemy on an open 20x20 grid.
pub(crate) fn enemy(id: EntityId, kind: EnemyKind, position: Vec2, health: ResourceMeter) -> Enemy {
    let body = WorldEntity::new(position, Size::new(20.0, 20.0), 0.1, SpriteId(2));
    let mind = Mind::new(
        MindKind::Melee,
        Arc::new(OccupancyGrid::open(20, 20)),
        &body,
        &GameConfig::default(),
        1,
    );
    Enemy::new(id, kind, body, health, mind)
}
