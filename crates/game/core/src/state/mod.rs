//! Mutable simulation state.
//!
//! Everything here is mutated every tick by the world driver, the minds and
//! the ability pipeline. Static level data (the occupancy grid) lives in
//! [`crate::grid`], static definitions in [`crate::env`].
pub mod types;

pub use types::{
    AbilityCooldowns, Direction, Enemy, EnemyKind, EntityId, Inventory, PlayerState, Rect,
    ResourceMeter, Side, Size, SoundId, SpriteId, Vec2, WorldEntity,
};
