//! Enemy behavior controllers.
//!
//! Every enemy owns exactly one [`Mind`], created from its definition's
//! [`MindKind`] when it spawns and dropped with it. A mind is called once per
//! tick with a read-only [`WorldView`] snapshot; it steers its own body by
//! setting the body's direction and asks the world for everything else
//! through the returned [`MindCommand`]s.
//!
//! Minds never wait. Every cadence (replanning, decisions, attacks, fleeing)
//! is a [`Timer`](crate::timer::Timer) advanced by the tick's elapsed time.

mod melee;
mod support;

use std::sync::Arc;

pub use melee::{FleeState, FleeTrigger, MeleeMind};
pub use support::SupportMind;

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::grid::OccupancyGrid;
use crate::projectile::ProjectileSpawn;
use crate::state::{EntityId, ResourceMeter, WorldEntity};
use crate::world::WorldView;

/// Behavior families an enemy definition can name.
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
pub enum MindKind {
    /// Chases and hits; runs away once when badly hurt.
    Melee,
    /// Keeps its distance, fires volleys and heals allies.
    Support,
}

/// What a mind asks the world to do after all minds have run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MindCommand {
    SpawnProjectile(ProjectileSpawn),
    Heal { target: EntityId, amount: u32 },
    MeleeHit { damage: u32 },
}

/// Everything a mind gets to look at and touch on one tick.
pub struct MindInput<'a, 'w> {
    pub view: &'a WorldView<'w>,
    pub id: EntityId,
    pub body: &'a mut WorldEntity,
    pub health: &'a ResourceMeter,
    pub rng: &'a mut dyn RngOracle,
    pub elapsed_ms: u32,
}

/// Per-enemy behavior controller.
#[derive(Clone, Debug)]
pub enum Mind {
    Melee(MeleeMind),
    Support(SupportMind),
}

impl Mind {
    /// Builds the mind for a freshly spawned enemy.
    ///
    /// `damage` is the enemy's contact damage; minds that never touch the
    /// player ignore it.
    pub fn new(
        kind: MindKind,
        grid: Arc<OccupancyGrid>,
        body: &WorldEntity,
        config: &GameConfig,
        damage: u32,
    ) -> Self {
        match kind {
            MindKind::Melee => Mind::Melee(MeleeMind::new(grid, body, config, damage)),
            MindKind::Support => Mind::Support(SupportMind::new(grid, body, config)),
        }
    }

    pub fn kind(&self) -> MindKind {
        match self {
            Mind::Melee(_) => MindKind::Melee,
            Mind::Support(_) => MindKind::Support,
        }
    }

    pub fn control(&mut self, input: MindInput<'_, '_>) -> Vec<MindCommand> {
        match self {
            Mind::Melee(mind) => mind.control(input),
            Mind::Support(mind) => mind.control(input),
        }
    }
}
