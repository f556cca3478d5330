//! Built-in ability effects.
//!
//! Each function only decides and applies the effect itself. Mana, cooldowns
//! and feedback are the pipeline's job.

use super::{AbilityContext, AbilityOutcome};
use crate::buff::Buff;
use crate::feedback::CombatEvent;
use crate::projectile::{ProjectileKind, ProjectileSpawn};
use crate::state::Side;

pub const HEAL_AMOUNT: u32 = 30;
pub const REST_DURATION_MS: u32 = 8_000;
const REST_HEAL: u32 = 3;
const REST_PULSE_MS: u32 = 500;
pub const NOVA_RADIUS: f32 = 96.0;
pub const NOVA_DAMAGE: u32 = 8;

fn launch(ctx: &mut AbilityContext<'_>, kind: ProjectileKind) -> AbilityOutcome {
    ctx.spawns.push(ProjectileSpawn {
        kind,
        side: Side::Player,
        origin: ctx.player.center(),
        direction: ctx.player.facing,
    });
    AbilityOutcome::success()
}

pub fn fireball(ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    launch(ctx, ProjectileKind::Fireball)
}

pub fn chaos_orb(ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    launch(ctx, ProjectileKind::ChaosOrb)
}

pub fn poison_cloud(ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    launch(ctx, ProjectileKind::PoisonCloud)
}

pub fn heal(ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    if ctx.player.health.is_full() {
        return AbilityOutcome::failure("Already at full health");
    }
    ctx.player.health.restore(HEAL_AMOUNT);
    AbilityOutcome::success()
}

pub fn rest(ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    match ctx
        .player
        .apply_buff(Buff::resting(REST_DURATION_MS, REST_HEAL, REST_PULSE_MS))
    {
        Ok(()) => AbilityOutcome::success(),
        Err(_) => AbilityOutcome::failure("Already resting"),
    }
}

/// Damages every enemy whose center is within [`NOVA_RADIUS`] of the player.
///
/// With nobody in range the cast is refunded instead of wasted.
pub fn nova(ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let origin = ctx.player.center();
    let mut hit_any = false;

    for enemy in ctx
        .enemies
        .iter_mut()
        .filter(|enemy| !enemy.is_dead() && enemy.entity.center().distance(origin) <= NOVA_RADIUS)
    {
        let amount = enemy.take_damage(NOVA_DAMAGE);
        ctx.events.push(CombatEvent::Damaged {
            target: enemy.id,
            amount,
        });
        hit_any = true;
    }

    if hit_any {
        AbilityOutcome::success()
    } else {
        AbilityOutcome::refund()
    }
}
