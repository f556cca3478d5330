//! Player-side combat state.

use std::collections::HashMap;

use arrayvec::ArrayVec;

use super::common::{Direction, ResourceMeter, Vec2};
use super::entity::WorldEntity;
use super::inventory::Inventory;
use crate::ability::AbilityKind;
use crate::buff::{Buff, BuffEvent, BuffKind, BuffRejected, BuffSet, BuffTarget};
use crate::config::GameConfig;
use crate::timer::Countdown;

/// Remaining cooldown per ability, counted down to zero every tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityCooldowns {
    remaining: HashMap<AbilityKind, u32>,
}

impl AbilityCooldowns {
    pub fn remaining_ms(&self, kind: AbilityKind) -> u32 {
        self.remaining.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, kind: AbilityKind) -> bool {
        self.remaining_ms(kind) == 0
    }

    pub fn set(&mut self, kind: AbilityKind, cooldown_ms: u32) {
        if cooldown_ms == 0 {
            self.remaining.remove(&kind);
        } else {
            self.remaining.insert(kind, cooldown_ms);
        }
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.remaining.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(elapsed_ms);
            *remaining > 0
        });
    }
}

/// Everything the ability and consumable pipelines read and mutate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub entity: WorldEntity,
    /// Last non-idle movement direction; aimed abilities fire this way.
    pub facing: Direction,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub cooldowns: AbilityCooldowns,
    /// Shared item-use cooldown; only the punitive cooldown ever sets it.
    pub consumable_cooldown: Countdown,
    pub unlocked: ArrayVec<AbilityKind, { GameConfig::MAX_UNLOCKED_ABILITIES }>,
    pub inventory: Inventory,
    pub buffs: BuffSet,
    pub stun: Countdown,
}

impl PlayerState {
    pub fn new(entity: WorldEntity, health: ResourceMeter, mana: ResourceMeter) -> Self {
        Self {
            entity,
            facing: Direction::Down,
            health,
            mana,
            cooldowns: AbilityCooldowns::default(),
            consumable_cooldown: Countdown::default(),
            unlocked: ArrayVec::new(),
            inventory: Inventory::new(),
            buffs: BuffSet::new(),
            stun: Countdown::default(),
        }
    }

    /// Unlocks an ability; unlocking twice is a no-op.
    pub fn unlock(&mut self, kind: AbilityKind) {
        if !self.unlocked.contains(&kind) && !self.unlocked.is_full() {
            self.unlocked.push(kind);
        }
    }

    pub fn has_unlocked(&self, kind: AbilityKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Sets the movement direction requested by input.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        if let Some(direction) = direction {
            self.facing = direction;
        }
        self.entity.direction = direction;
    }

    pub fn is_stunned(&self) -> bool {
        self.stun.is_running()
    }

    /// Stuns for `duration_ms`, keeping the longer of the old and new stun.
    pub fn stun_for(&mut self, duration_ms: u32) {
        if duration_ms > self.stun.remaining_ms() {
            self.stun.start(duration_ms);
        }
    }

    pub fn is_invisible(&self) -> bool {
        self.buffs.has(BuffKind::Invisibility)
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    pub fn center(&self) -> Vec2 {
        self.entity.center()
    }

    /// Applies damage and lets buffs react to it.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = self.health.drain(amount);
        if dealt > 0 {
            self.buffs.notify(BuffEvent::Damaged { amount: dealt });
        }
        dealt
    }

    pub fn apply_buff(&mut self, buff: Buff) -> Result<(), BuffRejected> {
        let mut buffs = std::mem::take(&mut self.buffs);
        let result = buffs.apply(buff, self);
        self.buffs = buffs;
        result
    }

    /// Advances buffs by one tick, returning the kinds that ended.
    pub fn tick_buffs(&mut self, elapsed_ms: u32) -> Vec<BuffKind> {
        let mut buffs = std::mem::take(&mut self.buffs);
        let removed = buffs.tick(self, elapsed_ms);
        self.buffs = buffs;
        removed
    }

    /// Counts ability cooldowns, the item-use cooldown and stun down.
    pub fn tick_cooldowns(&mut self, elapsed_ms: u32) {
        self.cooldowns.tick(elapsed_ms);
        self.consumable_cooldown.tick(elapsed_ms);
        self.stun.tick(elapsed_ms);
    }
}

impl BuffTarget for PlayerState {
    fn health_mut(&mut self) -> &mut ResourceMeter {
        &mut self.health
    }

    fn entity_mut(&mut self) -> &mut WorldEntity {
        &mut self.entity
    }
}
