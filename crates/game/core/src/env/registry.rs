//! The registry context object.

use std::collections::HashMap;

use super::{AbilityDefinition, ConsumableDefinition, EnemyDefinition, RegistryError};
use crate::ability::{self, AbilityEffectFn, AbilityKind};
use crate::consumable::{self, ConsumableCategory, ConsumableEffectFn, ConsumableKind};
use crate::mind::MindKind;
use crate::state::{EnemyKind, Size, SoundId, SpriteId};

/// Definition and effect tables, keyed by tag.
///
/// Built once at startup and passed by reference to whatever needs a lookup.
/// Tests build their own, so there is no process-wide state.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    abilities: HashMap<AbilityKind, AbilityDefinition>,
    ability_effects: HashMap<AbilityKind, AbilityEffectFn>,
    consumables: HashMap<ConsumableKind, ConsumableDefinition>,
    consumable_effects: HashMap<ConsumableKind, ConsumableEffectFn>,
    enemies: HashMap<EnemyKind, EnemyDefinition>,
}

impl Registry {
    /// Empty registry; every lookup fails until something is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in effect but no definitions.
    ///
    /// Content loaders start here and add definitions from data files.
    pub fn with_builtin_effects() -> Self {
        let mut registry = Self::new();

        registry.register_ability_effect(AbilityKind::Fireball, ability::fireball);
        registry.register_ability_effect(AbilityKind::ChaosOrb, ability::chaos_orb);
        registry.register_ability_effect(AbilityKind::PoisonCloud, ability::poison_cloud);
        registry.register_ability_effect(AbilityKind::Heal, ability::heal);
        registry.register_ability_effect(AbilityKind::Rest, ability::rest);
        registry.register_ability_effect(AbilityKind::Nova, ability::nova);

        registry.register_consumable_effect(ConsumableKind::HealthPotion, consumable::health_potion);
        registry.register_consumable_effect(ConsumableKind::ManaPotion, consumable::mana_potion);
        registry.register_consumable_effect(ConsumableKind::SpeedPotion, consumable::speed_potion);
        registry.register_consumable_effect(
            ConsumableKind::InvisibilityBrew,
            consumable::invisibility_brew,
        );
        registry.register_consumable_effect(
            ConsumableKind::RegenerationScroll,
            consumable::regeneration_scroll,
        );

        registry
    }

    /// Built-in effects plus the default definitions.
    pub fn standard() -> Self {
        let mut registry = Self::with_builtin_effects();

        let abilities = [
            (AbilityKind::Fireball, 5, 600, Some(1)),
            (AbilityKind::ChaosOrb, 8, 1_200, Some(2)),
            (AbilityKind::PoisonCloud, 12, 3_000, Some(3)),
            (AbilityKind::Heal, 10, 5_000, Some(4)),
            (AbilityKind::Rest, 0, 2_000, None),
            (AbilityKind::Nova, 15, 4_000, Some(5)),
        ];
        for (kind, mana_cost, cooldown_ms, sound) in abilities {
            let mut definition = AbilityDefinition::new(mana_cost, cooldown_ms, kind.as_ref());
            definition.sound = sound.map(SoundId);
            registry.register_ability(kind, definition);
        }

        let consumables = [
            (
                ConsumableKind::HealthPotion,
                "Restores 40 health.",
                ConsumableCategory::Potion,
            ),
            (
                ConsumableKind::ManaPotion,
                "Restores 40 mana.",
                ConsumableCategory::Potion,
            ),
            (
                ConsumableKind::SpeedPotion,
                "Move faster for a while.",
                ConsumableCategory::Elixir,
            ),
            (
                ConsumableKind::InvisibilityBrew,
                "Enemies lose track of you until you act.",
                ConsumableCategory::Elixir,
            ),
            (
                ConsumableKind::RegenerationScroll,
                "Slowly restores health.",
                ConsumableCategory::Scroll,
            ),
        ];
        for (id, (kind, description, category)) in (10..).zip(consumables) {
            registry.register_consumable(
                kind,
                ConsumableDefinition {
                    icon: kind.to_string(),
                    sprite: SpriteId(300 + id),
                    description: description.to_owned(),
                    sound: SoundId(id),
                    category,
                },
            );
        }

        registry.register_enemy(
            EnemyKind::Rat,
            EnemyDefinition {
                sprite: SpriteId(200),
                size: Size::new(20.0, 20.0),
                health: 6,
                speed: 0.12,
                mind: MindKind::Melee,
                damage: 2,
            },
        );
        registry.register_enemy(
            EnemyKind::Skeleton,
            EnemyDefinition {
                sprite: SpriteId(201),
                size: Size::new(28.0, 28.0),
                health: 20,
                speed: 0.08,
                mind: MindKind::Melee,
                damage: 5,
            },
        );
        registry.register_enemy(
            EnemyKind::GoblinShaman,
            EnemyDefinition {
                sprite: SpriteId(202),
                size: Size::new(24.0, 24.0),
                health: 12,
                speed: 0.06,
                mind: MindKind::Support,
                damage: 0,
            },
        );

        registry
    }

    pub fn register_ability(&mut self, kind: AbilityKind, definition: AbilityDefinition) {
        self.abilities.insert(kind, definition);
    }

    pub fn register_ability_effect(&mut self, kind: AbilityKind, effect: AbilityEffectFn) {
        self.ability_effects.insert(kind, effect);
    }

    pub fn register_consumable(&mut self, kind: ConsumableKind, definition: ConsumableDefinition) {
        self.consumables.insert(kind, definition);
    }

    pub fn register_consumable_effect(&mut self, kind: ConsumableKind, effect: ConsumableEffectFn) {
        self.consumable_effects.insert(kind, effect);
    }

    pub fn register_enemy(&mut self, kind: EnemyKind, definition: EnemyDefinition) {
        self.enemies.insert(kind, definition);
    }

    pub fn ability(&self, kind: AbilityKind) -> Result<&AbilityDefinition, RegistryError> {
        self.abilities
            .get(&kind)
            .ok_or(RegistryError::AbilityNotRegistered(kind))
    }

    pub fn ability_effect(&self, kind: AbilityKind) -> Result<AbilityEffectFn, RegistryError> {
        self.ability_effects
            .get(&kind)
            .copied()
            .ok_or(RegistryError::AbilityEffectMissing(kind))
    }

    pub fn consumable(&self, kind: ConsumableKind) -> Result<&ConsumableDefinition, RegistryError> {
        self.consumables
            .get(&kind)
            .ok_or(RegistryError::ConsumableNotRegistered(kind))
    }

    pub fn consumable_effect(
        &self,
        kind: ConsumableKind,
    ) -> Result<ConsumableEffectFn, RegistryError> {
        self.consumable_effects
            .get(&kind)
            .copied()
            .ok_or(RegistryError::ConsumableEffectMissing(kind))
    }

    pub fn enemy(&self, kind: EnemyKind) -> Result<&EnemyDefinition, RegistryError> {
        self.enemies
            .get(&kind)
            .ok_or(RegistryError::EnemyNotRegistered(kind))
    }

    pub fn abilities(&self) -> impl Iterator<Item = (AbilityKind, &AbilityDefinition)> {
        self.abilities.iter().map(|(kind, definition)| (*kind, definition))
    }
}
