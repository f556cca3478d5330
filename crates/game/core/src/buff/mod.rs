//! Buff/debuff engine.
//!
//! Buffs are timed effects attached to the player or to an enemy. Each buff
//! has three hooks driven by its owner:
//!
//! - `on_start` when applied, `on_end` when removed (expired or cancelled)
//! - `on_middle` once per tick for periodic effects (heal, damage)
//! - `on_event` for game events; a buff may answer [`BuffReaction::Cancel`]
//!
//! Cancellation is cooperative: an event only flags the buff, and the flagged
//! buff is removed by the next [`BuffSet::tick`].
//!
//! Buffs live inside the entity they affect, so [`BuffSet`] methods take the
//! target separately; owners move the set out, drive it, and put it back
//! (see `PlayerState::tick_buffs`).

mod effect;

use arrayvec::ArrayVec;

use crate::ability::AbilityKind;
use crate::config::GameConfig;
use crate::state::{ResourceMeter, WorldEntity};

pub use effect::{Buff, BuffEffect};

/// Types of buffs and debuffs.
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
pub enum BuffKind {
    /// HP recovery over time.
    Regeneration,

    /// Faster HP recovery while idle; broken by damage or ability use.
    Resting,

    /// Increased movement speed.
    Haste,

    /// HP loss over time.
    Poison,

    /// Enemies cannot track the owner.
    Invisibility,
}

impl BuffKind {
    /// How many buffs of this kind may be active at once.
    pub const fn stack_cap(self) -> usize {
        match self {
            BuffKind::Regeneration => 2,
            BuffKind::Poison => 3,
            BuffKind::Resting | BuffKind::Haste | BuffKind::Invisibility => 1,
        }
    }
}

/// Game events delivered to every active buff of the affected entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffEvent {
    /// The owner lost health.
    Damaged { amount: u32 },

    /// The owner successfully used an ability.
    AbilityUsed(AbilityKind),
}

/// Answer of a buff's event hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffReaction {
    Keep,
    Cancel,
}

/// Why [`BuffSet::apply`] refused a buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuffRejected {
    #[error("{0} is already at its effect cap")]
    AtCap(BuffKind),

    #[error("no room for more effects")]
    Full,
}

/// What a buff may read and modify on its owner.
pub trait BuffTarget {
    fn health_mut(&mut self) -> &mut ResourceMeter;
    fn entity_mut(&mut self) -> &mut WorldEntity;
}

/// Active buffs of one entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffSet {
    buffs: ArrayVec<Buff, { GameConfig::MAX_BUFFS }>,
}

impl BuffSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.kind() == kind && !b.is_cancelled())
    }

    pub fn count(&self, kind: BuffKind) -> usize {
        self.buffs.iter().filter(|b| b.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    /// Attaches a buff and runs its start hook.
    pub fn apply(&mut self, mut buff: Buff, target: &mut dyn BuffTarget) -> Result<(), BuffRejected> {
        let kind = buff.kind();
        if self.count(kind) >= kind.stack_cap() {
            return Err(BuffRejected::AtCap(kind));
        }
        if self.buffs.is_full() {
            return Err(BuffRejected::Full);
        }

        buff.on_start(target);
        self.buffs.push(buff);
        tracing::debug!("buff {} applied", kind);
        Ok(())
    }

    /// Delivers an event to every buff; buffs asking to cancel are flagged.
    pub fn notify(&mut self, event: BuffEvent) {
        for buff in self.buffs.iter_mut() {
            if buff.on_event(&event) == BuffReaction::Cancel {
                tracing::debug!("buff {} cancelled by {:?}", buff.kind(), event);
                buff.cancel();
            }
        }
    }

    /// Advances every buff by `elapsed_ms`.
    ///
    /// Cancelled buffs are ended and removed without running their periodic
    /// hook. Returns the kinds removed during this tick.
    pub fn tick(&mut self, target: &mut dyn BuffTarget, elapsed_ms: u32) -> Vec<BuffKind> {
        let mut removed = Vec::new();
        let mut kept = ArrayVec::new();

        for mut buff in self.buffs.drain(..) {
            if buff.is_cancelled() {
                buff.on_end(target);
                removed.push(buff.kind());
                continue;
            }

            buff.on_middle(target, elapsed_ms);
            if buff.advance(elapsed_ms) {
                buff.on_end(target);
                removed.push(buff.kind());
                continue;
            }

            kept.push(buff);
        }

        self.buffs = kept;
        removed
    }

    /// Ends and removes every buff, e.g. when the owner dies.
    pub fn clear(&mut self, target: &mut dyn BuffTarget) {
        for mut buff in self.buffs.drain(..) {
            buff.on_end(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Size, SpriteId, Vec2};

    struct Dummy {
        health: ResourceMeter,
        entity: WorldEntity,
    }

    impl Dummy {
        fn new(current: u32, maximum: u32) -> Self {
            Self {
                health: ResourceMeter::new(current, maximum),
                entity: WorldEntity::new(Vec2::ZERO, Size::new(16.0, 16.0), 0.1, SpriteId(0)),
            }
        }
    }

    impl BuffTarget for Dummy {
        fn health_mut(&mut self) -> &mut ResourceMeter {
            &mut self.health
        }

        fn entity_mut(&mut self) -> &mut WorldEntity {
            &mut self.entity
        }
    }

    #[test]
    fn regeneration_heals_on_each_pulse_until_expiry() {
        let mut dummy = Dummy::new(10, 100);
        let mut buffs = BuffSet::new();
        buffs.apply(Buff::regeneration(3000, 5, 1000), &mut dummy).unwrap();

        buffs.tick(&mut dummy, 1000);
        assert_eq!(dummy.health.current, 15);
        buffs.tick(&mut dummy, 1000);
        assert_eq!(dummy.health.current, 20);
        let removed = buffs.tick(&mut dummy, 1000);
        assert_eq!(dummy.health.current, 25);
        assert_eq!(removed, vec![BuffKind::Regeneration]);
        assert!(buffs.is_empty());
    }

    #[test]
    fn cancelled_buff_is_removed_on_next_tick_regardless_of_duration() {
        let mut dummy = Dummy::new(10, 100);
        let mut buffs = BuffSet::new();
        buffs.apply(Buff::resting(60_000, 4, 500), &mut dummy).unwrap();

        buffs.notify(BuffEvent::Damaged { amount: 3 });
        assert!(!buffs.has(BuffKind::Resting));
        assert_eq!(buffs.len(), 1);

        let removed = buffs.tick(&mut dummy, 16);
        assert_eq!(removed, vec![BuffKind::Resting]);
        assert!(buffs.is_empty());
        assert_eq!(dummy.health.current, 10);
    }

    #[test]
    fn regeneration_ignores_damage_events() {
        let mut dummy = Dummy::new(10, 100);
        let mut buffs = BuffSet::new();
        buffs.apply(Buff::regeneration(5000, 5, 1000), &mut dummy).unwrap();

        buffs.notify(BuffEvent::Damaged { amount: 3 });
        assert!(buffs.tick(&mut dummy, 16).is_empty());
        assert!(buffs.has(BuffKind::Regeneration));
    }

    #[test]
    fn haste_restores_original_speed_on_end() {
        let mut dummy = Dummy::new(10, 100);
        let mut buffs = BuffSet::new();
        buffs.apply(Buff::haste(500, 2.0), &mut dummy).unwrap();
        assert!((dummy.entity.speed - 0.2).abs() < f32::EPSILON);

        buffs.tick(&mut dummy, 600);
        assert!((dummy.entity.speed - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn apply_rejects_buffs_at_cap() {
        let mut dummy = Dummy::new(10, 100);
        let mut buffs = BuffSet::new();
        buffs.apply(Buff::haste(500, 2.0), &mut dummy).unwrap();
        assert_eq!(
            buffs.apply(Buff::haste(500, 2.0), &mut dummy),
            Err(BuffRejected::AtCap(BuffKind::Haste))
        );
    }

    #[test]
    fn poison_drains_health() {
        let mut dummy = Dummy::new(10, 100);
        let mut buffs = BuffSet::new();
        buffs.apply(Buff::poison(2000, 3, 500), &mut dummy).unwrap();
        buffs.tick(&mut dummy, 500);
        assert_eq!(dummy.health.current, 7);
    }
}
