//! Consumable items and their use pipeline.
//!
//! Same shape as abilities without mana: the item is the cost. A success
//! removes it from its slot, a failure leaves the slot alone and throttles
//! retries with the punitive cooldown on the shared item-use cooldown.

use crate::ability::ActivationError;
use crate::buff::{Buff, BuffRejected};
use crate::config::GameConfig;
use crate::env::Registry;
use crate::feedback::FeedbackSink;
use crate::state::PlayerState;

/// Message shown when the chosen inventory slot is empty.
pub const NOTHING_TO_USE: &str = "Nothing to use";
/// Message shown when a buff item would exceed its stack cap.
pub const AT_EFFECT_CAP: &str = "Already at effect cap";

const POTION_AMOUNT: u32 = 40;
const SPEED_DURATION_MS: u32 = 6_000;
const SPEED_MULTIPLIER: f32 = 1.5;
const INVISIBILITY_DURATION_MS: u32 = 5_000;
const REGENERATION_DURATION_MS: u32 = 10_000;
const REGENERATION_HEAL: u32 = 2;
const REGENERATION_PULSE_MS: u32 = 1_000;

/// Registered consumable types.
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
pub enum ConsumableKind {
    HealthPotion,
    ManaPotion,
    SpeedPotion,
    InvisibilityBrew,
    RegenerationScroll,
}

/// Broad grouping used by the inventory UI.
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
pub enum ConsumableCategory {
    Potion,
    Elixir,
    Scroll,
}

/// Result of a consumable's effect function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsumableOutcome {
    Success,
    Failure { reason: String },
}

impl ConsumableOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }
}

/// How a call to [`try_use_consumable`] ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsumableAttempt {
    Stunned,
    /// Still throttled by an earlier failure.
    OnCooldown,
    /// Empty slot or refused effect; the slot is unchanged.
    Failed { reason: String },
    Used(ConsumableKind),
}

/// Everything a consumable effect may touch.
pub struct ConsumableContext<'a> {
    pub player: &'a mut PlayerState,
}

/// Signature of a registered consumable effect.
pub type ConsumableEffectFn = fn(&mut ConsumableContext<'_>) -> ConsumableOutcome;

pub fn health_potion(ctx: &mut ConsumableContext<'_>) -> ConsumableOutcome {
    if ctx.player.health.is_full() {
        return ConsumableOutcome::failure("Already at full health");
    }
    ctx.player.health.restore(POTION_AMOUNT);
    ConsumableOutcome::Success
}

pub fn mana_potion(ctx: &mut ConsumableContext<'_>) -> ConsumableOutcome {
    if ctx.player.mana.is_full() {
        return ConsumableOutcome::failure("Already at full mana");
    }
    ctx.player.mana.restore(POTION_AMOUNT);
    ConsumableOutcome::Success
}

fn apply_buff(ctx: &mut ConsumableContext<'_>, buff: Buff) -> ConsumableOutcome {
    match ctx.player.apply_buff(buff) {
        Ok(()) => ConsumableOutcome::Success,
        Err(BuffRejected::AtCap(_)) => ConsumableOutcome::failure(AT_EFFECT_CAP),
        Err(BuffRejected::Full) => ConsumableOutcome::failure("Too many active effects"),
    }
}

pub fn speed_potion(ctx: &mut ConsumableContext<'_>) -> ConsumableOutcome {
    apply_buff(ctx, Buff::haste(SPEED_DURATION_MS, SPEED_MULTIPLIER))
}

pub fn invisibility_brew(ctx: &mut ConsumableContext<'_>) -> ConsumableOutcome {
    apply_buff(ctx, Buff::invisibility(INVISIBILITY_DURATION_MS))
}

pub fn regeneration_scroll(ctx: &mut ConsumableContext<'_>) -> ConsumableOutcome {
    apply_buff(
        ctx,
        Buff::regeneration(
            REGENERATION_DURATION_MS,
            REGENERATION_HEAL,
            REGENERATION_PULSE_MS,
        ),
    )
}

/// Attempts to use the item in inventory `slot`.
///
/// # Errors
///
/// [`ActivationError::UnknownSlot`] for a slot index past the inventory, and
/// [`ActivationError::Registry`] for an item kind nobody registered.
pub fn try_use_consumable(
    slot: usize,
    ctx: &mut ConsumableContext<'_>,
    registry: &Registry,
    config: &GameConfig,
    feedback: &mut dyn FeedbackSink,
) -> Result<ConsumableAttempt, ActivationError> {
    if ctx.player.is_stunned() {
        return Ok(ConsumableAttempt::Stunned);
    }

    if !ctx.player.inventory.contains_slot(slot) {
        return Err(ActivationError::UnknownSlot {
            slot,
            capacity: ctx.player.inventory.capacity(),
        });
    }

    // An empty slot reports itself even while the item cooldown runs.
    let Some(kind) = ctx.player.inventory.get(slot) else {
        reject(ctx.player, config, feedback, NOTHING_TO_USE);
        return Ok(ConsumableAttempt::Failed {
            reason: NOTHING_TO_USE.to_owned(),
        });
    };

    if ctx.player.consumable_cooldown.is_running() {
        return Ok(ConsumableAttempt::OnCooldown);
    }
    let definition = registry.consumable(kind)?;
    let effect = registry.consumable_effect(kind)?;

    match effect(ctx) {
        ConsumableOutcome::Failure { reason } => {
            tracing::debug!("{kind} in slot {slot} failed: {reason}");
            reject(ctx.player, config, feedback, &reason);
            Ok(ConsumableAttempt::Failed { reason })
        }
        ConsumableOutcome::Success => {
            ctx.player.inventory.take(slot);
            feedback.play_sound(definition.sound);
            Ok(ConsumableAttempt::Used(kind))
        }
    }
}

fn reject(
    player: &mut PlayerState,
    config: &GameConfig,
    feedback: &mut dyn FeedbackSink,
    reason: &str,
) {
    player.consumable_cooldown.start(config.punitive_cooldown_ms);
    feedback.set_message(reason);
    feedback.notify_invalid_action();
}
