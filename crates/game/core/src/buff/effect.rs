//! Concrete buff variants and their hooks.

use super::{BuffEvent, BuffKind, BuffReaction, BuffTarget};
use crate::ability::AbilityKind;
use crate::timer::Timer;

/// Variant-specific state of a buff.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffEffect {
    /// Restores `amount` health every pulse.
    PeriodicHeal { amount: u32, pulse: Timer },

    /// Removes `amount` health every pulse.
    PeriodicDamage { amount: u32, pulse: Timer },

    /// Multiplies movement speed while active.
    SpeedBoost {
        multiplier: f32,
        original_speed: Option<f32>,
    },

    /// No periodic effect; presence alone matters (invisibility).
    Marker,
}

/// A timed effect attached to one entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    kind: BuffKind,
    remaining_ms: u32,
    effect: BuffEffect,
    cancelled: bool,
}

impl Buff {
    pub fn new(kind: BuffKind, duration_ms: u32, effect: BuffEffect) -> Self {
        Self {
            kind,
            remaining_ms: duration_ms,
            effect,
            cancelled: false,
        }
    }

    pub fn regeneration(duration_ms: u32, amount: u32, pulse_ms: u32) -> Self {
        Self::new(
            BuffKind::Regeneration,
            duration_ms,
            BuffEffect::PeriodicHeal {
                amount,
                pulse: Timer::new(pulse_ms),
            },
        )
    }

    pub fn resting(duration_ms: u32, amount: u32, pulse_ms: u32) -> Self {
        Self::new(
            BuffKind::Resting,
            duration_ms,
            BuffEffect::PeriodicHeal {
                amount,
                pulse: Timer::new(pulse_ms),
            },
        )
    }

    pub fn poison(duration_ms: u32, amount: u32, pulse_ms: u32) -> Self {
        Self::new(
            BuffKind::Poison,
            duration_ms,
            BuffEffect::PeriodicDamage {
                amount,
                pulse: Timer::new(pulse_ms),
            },
        )
    }

    pub fn haste(duration_ms: u32, multiplier: f32) -> Self {
        Self::new(
            BuffKind::Haste,
            duration_ms,
            BuffEffect::SpeedBoost {
                multiplier,
                original_speed: None,
            },
        )
    }

    pub fn invisibility(duration_ms: u32) -> Self {
        Self::new(BuffKind::Invisibility, duration_ms, BuffEffect::Marker)
    }

    pub fn kind(&self) -> BuffKind {
        self.kind
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(super) fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Counts the duration down. Returns true once it has run out.
    pub(super) fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    pub(super) fn on_start(&mut self, target: &mut dyn BuffTarget) {
        if let BuffEffect::SpeedBoost {
            multiplier,
            original_speed,
        } = &mut self.effect
        {
            let entity = target.entity_mut();
            *original_speed = Some(entity.speed);
            entity.speed *= *multiplier;
        }
    }

    pub(super) fn on_middle(&mut self, target: &mut dyn BuffTarget, elapsed_ms: u32) {
        match &mut self.effect {
            BuffEffect::PeriodicHeal { amount, pulse } => {
                if pulse.tick(elapsed_ms) {
                    target.health_mut().restore(*amount);
                }
            }
            BuffEffect::PeriodicDamage { amount, pulse } => {
                if pulse.tick(elapsed_ms) {
                    target.health_mut().drain(*amount);
                }
            }
            BuffEffect::SpeedBoost { .. } | BuffEffect::Marker => {}
        }
    }

    pub(super) fn on_end(&mut self, target: &mut dyn BuffTarget) {
        if let BuffEffect::SpeedBoost { original_speed, .. } = &mut self.effect
            && let Some(speed) = original_speed.take()
        {
            target.entity_mut().speed = speed;
        }
    }

    pub(super) fn on_event(&self, event: &BuffEvent) -> BuffReaction {
        match (self.kind, event) {
            (BuffKind::Resting, BuffEvent::Damaged { amount }) if *amount > 0 => {
                BuffReaction::Cancel
            }
            (BuffKind::Resting, BuffEvent::AbilityUsed(ability)) if *ability != AbilityKind::Rest => {
                BuffReaction::Cancel
            }
            (BuffKind::Invisibility, BuffEvent::AbilityUsed(_)) => BuffReaction::Cancel,
            _ => BuffReaction::Keep,
        }
    }
}
