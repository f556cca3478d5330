pub mod common;
pub mod enemy;
pub mod entity;
pub mod inventory;
pub mod player;

// Re-export common types
pub use common::{
    Direction, EntityId, Rect, ResourceMeter, Side, Size, SoundId, SpriteId, Vec2,
};

// Re-export entity types
pub use enemy::{Enemy, EnemyKind};
pub use entity::WorldEntity;

// Re-export player-side types
pub use inventory::Inventory;
pub use player::{AbilityCooldowns, PlayerState};
