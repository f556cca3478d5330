//! Ability activation pipeline.

use super::{AbilityAttempt, AbilityContext, AbilityKind, AbilityOutcome, ActivationError};
use crate::buff::BuffEvent;
use crate::config::GameConfig;
use crate::env::Registry;
use crate::feedback::FeedbackSink;

/// Message shown when the player cannot pay an ability's mana cost.
pub const NOT_ENOUGH_MANA: &str = "Not enough mana";

/// Attempts to use `kind` on behalf of the player in `ctx`.
///
/// Gates run in order: stun and cooldown reject silently, missing mana and a
/// failing effect apply the punitive cooldown and tell the player why. Only a
/// plain success spends mana and starts the ability's own cooldown.
///
/// # Errors
///
/// [`ActivationError`] when the ability is not unlocked or not registered.
/// These indicate broken wiring, never a gameplay outcome.
pub fn try_use_ability(
    kind: AbilityKind,
    ctx: &mut AbilityContext<'_>,
    registry: &Registry,
    config: &GameConfig,
    feedback: &mut dyn FeedbackSink,
) -> Result<AbilityAttempt, ActivationError> {
    if ctx.player.is_stunned() {
        return Ok(AbilityAttempt::Stunned);
    }

    if !ctx.player.has_unlocked(kind) {
        return Err(ActivationError::AbilityNotUnlocked(kind));
    }
    let definition = registry.ability(kind)?;
    let effect = registry.ability_effect(kind)?;

    if !ctx.player.cooldowns.is_ready(kind) {
        return Ok(AbilityAttempt::OnCooldown);
    }

    let punitive_ms = definition
        .punitive_cooldown_ms
        .unwrap_or(config.punitive_cooldown_ms);

    if ctx.player.mana.current < definition.mana_cost {
        tracing::debug!(
            "{kind} needs {} mana, player has {}",
            definition.mana_cost,
            ctx.player.mana.current
        );
        ctx.player.cooldowns.set(kind, punitive_ms);
        feedback.set_message(NOT_ENOUGH_MANA);
        feedback.notify_invalid_action();
        return Ok(AbilityAttempt::InsufficientMana);
    }

    match effect(ctx) {
        AbilityOutcome::Failure { reason } => {
            tracing::debug!("{kind} failed: {reason}");
            ctx.player.cooldowns.set(kind, punitive_ms);
            feedback.set_message(&reason);
            feedback.notify_invalid_action();
            Ok(AbilityAttempt::Failed { reason })
        }
        AbilityOutcome::Success { refund: true } => {
            ctx.player.cooldowns.set(kind, punitive_ms);
            Ok(AbilityAttempt::Refunded)
        }
        AbilityOutcome::Success { refund: false } => {
            ctx.player.mana.spend(definition.mana_cost);
            ctx.player.cooldowns.set(kind, definition.cooldown_ms);

            match definition.sound {
                Some(sound) => feedback.play_sound(sound),
                None => tracing::warn!("no sound configured for ability {kind}"),
            }

            ctx.player.buffs.notify(BuffEvent::AbilityUsed(kind));
            feedback.notify_ability_clicked(kind);
            Ok(AbilityAttempt::Used)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::{Buff, BuffKind};
    use crate::env::AbilityDefinition;
    use crate::feedback::{FeedbackEvent, FeedbackLog};
    use crate::state::{PlayerState, SoundId};
    use crate::testing;

    fn attempt(
        kind: AbilityKind,
        player: &mut PlayerState,
        registry: &Registry,
        log: &mut FeedbackLog,
    ) -> Result<AbilityAttempt, ActivationError> {
        let mut spawns = Vec::new();
        let mut events = Vec::new();
        let mut ctx = AbilityContext {
            player,
            enemies: &mut [],
            spawns: &mut spawns,
            events: &mut events,
        };
        try_use_ability(kind, &mut ctx, registry, &GameConfig::default(), log)
    }

    #[test]
    fn stunned_player_is_ignored_silently() {
        let registry = Registry::standard();
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        player.stun_for(1000);
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Fireball, &mut player, &registry, &mut log);

        assert_eq!(result, Ok(AbilityAttempt::Stunned));
        assert!(log.events.is_empty());
        assert!(player.cooldowns.is_ready(AbilityKind::Fireball));
    }

    #[test]
    fn locked_ability_is_a_programmer_error() {
        let registry = Registry::standard();
        let mut player = testing::player();
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Nova, &mut player, &registry, &mut log);

        assert_eq!(
            result,
            Err(ActivationError::AbilityNotUnlocked(AbilityKind::Nova))
        );
    }

    #[test]
    fn unregistered_ability_is_a_programmer_error() {
        let registry = Registry::new();
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Fireball, &mut player, &registry, &mut log);

        assert!(matches!(result, Err(ActivationError::Registry(_))));
    }

    #[test]
    fn cooldown_rejects_silently() {
        let registry = Registry::standard();
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        player.cooldowns.set(AbilityKind::Fireball, 200);
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Fireball, &mut player, &registry, &mut log);

        assert_eq!(result, Ok(AbilityAttempt::OnCooldown));
        assert!(log.events.is_empty());
        assert_eq!(player.cooldowns.remaining_ms(AbilityKind::Fireball), 200);
    }

    #[test]
    fn missing_mana_applies_punitive_cooldown() {
        let registry = Registry::standard();
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        player.mana.current = 1;
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Fireball, &mut player, &registry, &mut log);

        assert_eq!(result, Ok(AbilityAttempt::InsufficientMana));
        assert_eq!(player.mana.current, 1);
        assert_eq!(
            player.cooldowns.remaining_ms(AbilityKind::Fireball),
            GameConfig::DEFAULT_PUNITIVE_COOLDOWN_MS
        );
        assert_eq!(
            log.events,
            vec![
                FeedbackEvent::Message(NOT_ENOUGH_MANA.to_owned()),
                FeedbackEvent::Sound(SoundId::INVALID_ACTION),
            ]
        );
    }

    #[test]
    fn failed_effect_keeps_mana_and_reports_reason() {
        let registry = Registry::standard();
        let mut player = testing::player();
        player.unlock(AbilityKind::Heal);
        let mana = player.mana.current;
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Heal, &mut player, &registry, &mut log);

        assert_eq!(
            result,
            Ok(AbilityAttempt::Failed {
                reason: "Already at full health".to_owned()
            })
        );
        assert_eq!(player.mana.current, mana);
        assert_eq!(player.cooldowns.remaining_ms(AbilityKind::Heal), 500);
        assert_eq!(log.messages().collect::<Vec<_>>(), vec!["Already at full health"]);
    }

    #[test]
    fn refund_only_applies_punitive_cooldown() {
        let registry = Registry::standard();
        let mut player = testing::player();
        player.unlock(AbilityKind::Nova);
        let mana = player.mana.current;
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Nova, &mut player, &registry, &mut log);

        assert_eq!(result, Ok(AbilityAttempt::Refunded));
        assert_eq!(player.mana.current, mana);
        assert_eq!(player.cooldowns.remaining_ms(AbilityKind::Nova), 500);
        assert!(log.events.is_empty());
    }

    #[test]
    fn success_spends_exact_cost_and_sets_cooldown() {
        let registry = Registry::standard();
        let definition = registry.ability(AbilityKind::Fireball).unwrap().clone();
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        let mana = player.mana.current;
        let mut log = FeedbackLog::new();

        let result = attempt(AbilityKind::Fireball, &mut player, &registry, &mut log);

        assert_eq!(result, Ok(AbilityAttempt::Used));
        assert_eq!(player.mana.current, mana - definition.mana_cost);
        assert_eq!(
            player.cooldowns.remaining_ms(AbilityKind::Fireball),
            definition.cooldown_ms
        );
        assert!(log.events.contains(&FeedbackEvent::AbilityClicked(AbilityKind::Fireball)));
        assert!(log.sounds().any(|sound| Some(sound) == definition.sound));
    }

    #[test]
    fn per_ability_punitive_override_wins() {
        let mut registry = Registry::standard();
        let base = registry.ability(AbilityKind::Fireball).unwrap().clone();
        registry.register_ability(
            AbilityKind::Fireball,
            AbilityDefinition {
                punitive_cooldown_ms: Some(250),
                ..base
            },
        );
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        player.mana.current = 0;
        let mut log = FeedbackLog::new();

        attempt(AbilityKind::Fireball, &mut player, &registry, &mut log).unwrap();

        assert_eq!(player.cooldowns.remaining_ms(AbilityKind::Fireball), 250);
    }

    #[test]
    fn casting_breaks_invisibility() {
        let registry = Registry::standard();
        let mut player = testing::player();
        player.unlock(AbilityKind::Fireball);
        player.apply_buff(Buff::invisibility(5000)).unwrap();
        let mut log = FeedbackLog::new();

        attempt(AbilityKind::Fireball, &mut player, &registry, &mut log).unwrap();
        player.tick_buffs(16);

        assert!(!player.buffs.has(BuffKind::Invisibility));
    }
}
