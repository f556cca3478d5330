//! Enemy AI and combat resolution for a real-time grid arena.
//!
//! `game-core` is synchronous and tick-driven: nothing in it blocks, sleeps or
//! spawns threads. A driver (see the `runtime` crate) calls [`World::tick`]
//! with the elapsed milliseconds of each frame and forwards player input to
//! [`World::try_use_ability`] / [`World::try_use_consumable`].
//!
//! Static data lives in a [`Registry`] built once at startup and passed by
//! reference; outbound notifications go through a [`FeedbackSink`].
pub mod ability;
pub mod buff;
pub mod config;
pub mod consumable;
pub mod env;
pub mod error;
pub mod feedback;
pub mod grid;
pub mod mind;
pub mod navigation;
pub mod projectile;
pub mod state;
pub mod timer;
pub mod world;

#[cfg(test)]
mod testing;

pub use ability::{AbilityAttempt, AbilityKind, AbilityOutcome, ActivationError};
pub use buff::{Buff, BuffEvent, BuffKind, BuffSet};
pub use config::GameConfig;
pub use consumable::{ConsumableAttempt, ConsumableCategory, ConsumableKind, ConsumableOutcome};
pub use env::{
    AbilityDefinition, ConsumableDefinition, EnemyDefinition, PcgRng, Registry, RegistryError,
    RngOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use feedback::{CombatEvent, FeedbackEvent, FeedbackLog, FeedbackSink, NullFeedback};
pub use grid::{Cell, Footprint, GridError, GridPathfinder, OccupancyGrid};
pub use mind::{FleeState, Mind, MindCommand, MindKind};
pub use navigation::{CollisionOracle, EnemyPathfinder};
pub use projectile::{Projectile, ProjectileKind, ProjectileSpawn};
pub use state::{
    Direction, Enemy, EnemyKind, EntityId, Inventory, PlayerState, Rect, ResourceMeter, Side,
    Size, SoundId, SpriteId, Vec2, WorldEntity,
};
pub use timer::{Countdown, Timer};
pub use world::{TickReport, World, WorldView};
