//! Projectiles and their controllers.
//!
//! A projectile is a moving [`WorldEntity`] with an owned
//! [`ProjectileController`]. The world moves it and detects overlaps; the
//! controller decides what the overlap means and whether the projectile is
//! used up.

mod controller;

pub use controller::{HitWindow, ProjectileBehavior, ProjectileController};

use crate::state::{Direction, EntityId, Side, Size, SpriteId, Vec2, WorldEntity};

/// How long an enemy bolt stuns the player it hits.
pub const BOLT_STUN_MS: u32 = 300;

/// Registered projectile types.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectileKind {
    /// Player shot; damages the first enemy it hits.
    Fireball,
    /// Enemy shot; damages and briefly stuns the player.
    Bolt,
    /// Slow player cloud; damages and poisons every enemy it overlaps, periodically.
    PoisonCloud,
    /// Player shot; damages and bounces off in a random direction.
    ChaosOrb,
}

/// Fixed numbers of one projectile kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileStats {
    pub size: Size,
    /// World units per millisecond.
    pub speed: f32,
    pub max_age_ms: u32,
    pub damage: u32,
    pub sprite: SpriteId,
}

impl ProjectileKind {
    pub const fn stats(self) -> ProjectileStats {
        match self {
            ProjectileKind::Fireball => ProjectileStats {
                size: Size::new(12.0, 12.0),
                speed: 0.35,
                max_age_ms: 1500,
                damage: 10,
                sprite: SpriteId(100),
            },
            ProjectileKind::Bolt => ProjectileStats {
                size: Size::new(8.0, 8.0),
                speed: 0.25,
                max_age_ms: 2000,
                damage: 4,
                sprite: SpriteId(101),
            },
            ProjectileKind::PoisonCloud => ProjectileStats {
                size: Size::new(48.0, 48.0),
                speed: 0.05,
                max_age_ms: 6000,
                damage: 2,
                sprite: SpriteId(102),
            },
            ProjectileKind::ChaosOrb => ProjectileStats {
                size: Size::new(16.0, 16.0),
                speed: 0.3,
                max_age_ms: 3000,
                damage: 6,
                sprite: SpriteId(103),
            },
        }
    }

    /// Fresh controller for a projectile of this kind.
    pub fn controller(self) -> ProjectileController {
        let stats = self.stats();
        let behavior = match self {
            ProjectileKind::Fireball => ProjectileBehavior::Impact { stun_ms: 0 },
            ProjectileKind::Bolt => ProjectileBehavior::Impact {
                stun_ms: BOLT_STUN_MS,
            },
            ProjectileKind::PoisonCloud => ProjectileBehavior::Cloud {
                window: HitWindow::new(500),
            },
            ProjectileKind::ChaosOrb => ProjectileBehavior::Deflect {
                window: HitWindow::new(400),
            },
        };
        ProjectileController::new(stats.max_age_ms, stats.damage, behavior)
    }
}

/// Request to create a projectile, emitted by abilities and minds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSpawn {
    pub kind: ProjectileKind,
    pub side: Side,
    /// Center of the new projectile.
    pub origin: Vec2,
    pub direction: Direction,
}

/// A live projectile.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    pub kind: ProjectileKind,
    pub side: Side,
    pub entity: WorldEntity,
    pub controller: ProjectileController,
    pub expired: bool,
}

impl Projectile {
    pub fn spawn(id: EntityId, spawn: ProjectileSpawn) -> Self {
        let stats = spawn.kind.stats();
        let position = spawn
            .origin
            .offset(-stats.size.w / 2.0, -stats.size.h / 2.0);
        let mut entity = WorldEntity::new(position, stats.size, stats.speed, stats.sprite);
        entity.direction = Some(spawn.direction);

        Self {
            id,
            kind: spawn.kind,
            side: spawn.side,
            entity,
            controller: spawn.kind.controller(),
            expired: false,
        }
    }

    /// Ages the projectile, flagging it once it outlives its max age.
    pub fn on_tick(&mut self, elapsed_ms: u32) {
        if self.controller.on_tick(elapsed_ms) {
            self.expired = true;
        }
    }

    /// True when this projectile may hit an entity of `side`.
    pub fn targets(&self, side: Side) -> bool {
        self.side != side
    }
}
