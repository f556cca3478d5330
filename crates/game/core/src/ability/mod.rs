//! Player abilities: kinds, outcomes, and the activation pipeline.
//!
//! An ability's behavior is a plain function looked up in the
//! [`Registry`](crate::env::Registry) by [`AbilityKind`]. The pipeline in
//! [`try_use_ability`] wraps that function with the stun, cooldown and mana
//! gates and turns its [`AbilityOutcome`] into feedback and state changes.

mod effects;
mod pipeline;

pub use effects::{
    chaos_orb, fireball, heal, nova, poison_cloud, rest, HEAL_AMOUNT, NOVA_DAMAGE, NOVA_RADIUS,
    REST_DURATION_MS,
};
pub use pipeline::try_use_ability;

use crate::env::RegistryError;
use crate::error::{ErrorSeverity, GameError};
use crate::feedback::CombatEvent;
use crate::projectile::ProjectileSpawn;
use crate::state::{Enemy, PlayerState};

/// Abilities the player can unlock.
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
pub enum AbilityKind {
    /// Launches a fireball in the facing direction.
    Fireball,
    /// Launches an orb that bounces off enemies in random directions.
    ChaosOrb,
    /// Launches a slow cloud that damages everything it drifts through.
    PoisonCloud,
    Heal,
    /// Heals over time until the player is hit or acts.
    Rest,
    /// Damages every enemy around the player.
    Nova,
}

/// Result of an ability's effect function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// The effect happened. With `refund` set, nothing was actually spent:
    /// the pipeline only applies the punitive cooldown.
    Success { refund: bool },

    /// The effect could not happen; `reason` is shown to the player.
    Failure { reason: String },
}

impl AbilityOutcome {
    pub const fn success() -> Self {
        Self::Success { refund: false }
    }

    pub const fn refund() -> Self {
        Self::Success { refund: true }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }
}

/// How a call to [`try_use_ability`] ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilityAttempt {
    /// Ignored silently: the player is stunned.
    Stunned,
    /// Ignored silently: the ability is still cooling down.
    OnCooldown,
    /// Rejected before the effect ran; punitive cooldown applied.
    InsufficientMana,
    /// The effect refused; punitive cooldown applied.
    Failed { reason: String },
    /// The effect short-circuited; punitive cooldown only, nothing spent.
    Refunded,
    /// Mana spent, cooldown started.
    Used,
}

impl AbilityAttempt {
    pub fn is_used(&self) -> bool {
        matches!(self, AbilityAttempt::Used)
    }
}

/// Programmer errors raised when activation is requested for something the
/// player does not have. Never produced by ordinary play.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActivationError {
    #[error("ability {0} is not unlocked")]
    AbilityNotUnlocked(AbilityKind),

    #[error("inventory slot {slot} does not exist (capacity {capacity})")]
    UnknownSlot { slot: usize, capacity: usize },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GameError for ActivationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AbilityNotUnlocked(_) | Self::UnknownSlot { .. } => ErrorSeverity::Internal,
            Self::Registry(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AbilityNotUnlocked(_) => "ACTIVATION_NOT_UNLOCKED",
            Self::UnknownSlot { .. } => "ACTIVATION_UNKNOWN_SLOT",
            Self::Registry(inner) => inner.error_code(),
        }
    }
}

/// Everything an ability effect may touch.
pub struct AbilityContext<'a> {
    pub player: &'a mut PlayerState,
    pub enemies: &'a mut [Enemy],
    /// Projectiles to spawn once the effect returns.
    pub spawns: &'a mut Vec<ProjectileSpawn>,
    /// Combat events to report once the effect returns.
    pub events: &'a mut Vec<CombatEvent>,
}

/// Signature of a registered ability effect.
pub type AbilityEffectFn = fn(&mut AbilityContext<'_>) -> AbilityOutcome;
