//! Enemy entities.

use super::common::{EntityId, ResourceMeter};
use super::entity::WorldEntity;
use crate::buff::{Buff, BuffEvent, BuffKind, BuffRejected, BuffSet, BuffTarget};
use crate::mind::Mind;

/// Registered enemy types. Stats live in `EnemyDefinition`.
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
pub enum EnemyKind {
    /// Fast, fragile melee chaser that runs away when hurt.
    Rat,
    /// Slow, sturdy melee chaser.
    Skeleton,
    /// Ranged caster that heals nearby allies.
    GoblinShaman,
}

/// A live enemy: body, health, behavior and active buffs.
///
/// The mind is owned exclusively and lives exactly as long as the enemy.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub entity: WorldEntity,
    pub health: ResourceMeter,
    pub mind: Mind,
    pub buffs: BuffSet,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        entity: WorldEntity,
        health: ResourceMeter,
        mind: Mind,
    ) -> Self {
        Self {
            id,
            kind,
            entity,
            health,
            mind,
            buffs: BuffSet::new(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = self.health.drain(amount);
        if dealt > 0 {
            self.buffs.notify(BuffEvent::Damaged { amount: dealt });
        }
        dealt
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health.restore(amount)
    }

    pub fn apply_buff(&mut self, buff: Buff) -> Result<(), BuffRejected> {
        let mut buffs = std::mem::take(&mut self.buffs);
        let result = buffs.apply(buff, self);
        self.buffs = buffs;
        result
    }

    pub fn tick_buffs(&mut self, elapsed_ms: u32) -> Vec<BuffKind> {
        let mut buffs = std::mem::take(&mut self.buffs);
        let removed = buffs.tick(self, elapsed_ms);
        self.buffs = buffs;
        removed
    }
}

impl BuffTarget for Enemy {
    fn health_mut(&mut self) -> &mut ResourceMeter {
        &mut self.health
    }

    fn entity_mut(&mut self) -> &mut WorldEntity {
        &mut self.entity
    }
}
