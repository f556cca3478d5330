//! Outbound notifications to the UI and audio layers.
//!
//! The core never renders or plays anything itself. It reports what happened
//! through a [`FeedbackSink`] and moves on; nothing it calls returns a value
//! the core depends on.

use crate::ability::AbilityKind;
use crate::buff::BuffKind;
use crate::projectile::ProjectileKind;
use crate::state::{EnemyKind, EntityId, SoundId};

/// Gameplay facts worth showing (damage numbers, death animations, logs).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    Damaged { target: EntityId, amount: u32 },
    Healed { target: EntityId, amount: u32 },
    EnemySpawned { id: EntityId, kind: EnemyKind },
    EnemyDied { id: EntityId, kind: EnemyKind },
    ProjectileExpired { id: EntityId, kind: ProjectileKind },
    BuffApplied { target: EntityId, kind: BuffKind },
    BuffEnded { target: EntityId, kind: BuffKind },
}

/// Fire-and-forget feedback consumer.
pub trait FeedbackSink {
    /// Shows a short message to the player.
    fn set_message(&mut self, text: &str);

    /// Flashes the ability's slot after a successful use.
    fn notify_ability_clicked(&mut self, kind: AbilityKind);

    fn play_sound(&mut self, sound: SoundId);

    /// Cue for any rejected ability or consumable attempt.
    fn notify_invalid_action(&mut self) {
        self.play_sound(SoundId::INVALID_ACTION);
    }

    fn on_combat(&mut self, _event: CombatEvent) {}
}

/// One recorded call on a [`FeedbackLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedbackEvent {
    Message(String),
    AbilityClicked(AbilityKind),
    Sound(SoundId),
    Combat(CombatEvent),
}

/// Sink that records every call, in order.
#[derive(Clone, Debug, Default)]
pub struct FeedbackLog {
    pub events: Vec<FeedbackEvent>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            FeedbackEvent::Message(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundId> + '_ {
        self.events.iter().filter_map(|event| match event {
            FeedbackEvent::Sound(sound) => Some(*sound),
            _ => None,
        })
    }

    pub fn combat(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter().filter_map(|event| match event {
            FeedbackEvent::Combat(combat) => Some(combat),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl FeedbackSink for FeedbackLog {
    fn set_message(&mut self, text: &str) {
        self.events.push(FeedbackEvent::Message(text.to_owned()));
    }

    fn notify_ability_clicked(&mut self, kind: AbilityKind) {
        self.events.push(FeedbackEvent::AbilityClicked(kind));
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.events.push(FeedbackEvent::Sound(sound));
    }

    fn on_combat(&mut self, event: CombatEvent) {
        self.events.push(FeedbackEvent::Combat(event));
    }
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn set_message(&mut self, _text: &str) {}

    fn notify_ability_clicked(&mut self, _kind: AbilityKind) {}

    fn play_sound(&mut self, _sound: SoundId) {}
}
