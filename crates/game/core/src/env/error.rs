//! Registry lookup errors.

use crate::ability::AbilityKind;
use crate::consumable::ConsumableKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EnemyKind;

/// A tag was looked up that nobody registered.
///
/// Registries are filled once at startup, so any of these means the content
/// and the code disagree. Nothing in normal play can recover from that.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    #[error("ability {0} has no definition")]
    AbilityNotRegistered(AbilityKind),

    #[error("ability {0} has no effect")]
    AbilityEffectMissing(AbilityKind),

    #[error("consumable {0} has no definition")]
    ConsumableNotRegistered(ConsumableKind),

    #[error("consumable {0} has no effect")]
    ConsumableEffectMissing(ConsumableKind),

    #[error("enemy {0} has no definition")]
    EnemyNotRegistered(EnemyKind),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use RegistryError::*;
        match self {
            AbilityNotRegistered(_) => "REGISTRY_ABILITY_NOT_REGISTERED",
            AbilityEffectMissing(_) => "REGISTRY_ABILITY_EFFECT_MISSING",
            ConsumableNotRegistered(_) => "REGISTRY_CONSUMABLE_NOT_REGISTERED",
            ConsumableEffectMissing(_) => "REGISTRY_CONSUMABLE_EFFECT_MISSING",
            EnemyNotRegistered(_) => "REGISTRY_ENEMY_NOT_REGISTERED",
        }
    }
}
