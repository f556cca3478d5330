use crate::buff::{Buff, BuffKind};
use crate::env::RngOracle;
use crate::feedback::{CombatEvent, FeedbackSink};
use crate::state::{Direction, Enemy, EntityId, PlayerState, WorldEntity};
use crate::timer::Countdown;

const CLOUD_POISON_MS: u32 = 3000;
const CLOUD_POISON_DAMAGE: u32 = 1;
const CLOUD_POISON_PULSE_MS: u32 = 1000;

fn cloud_poison() -> Buff {
    Buff::poison(CLOUD_POISON_MS, CLOUD_POISON_DAMAGE, CLOUD_POISON_PULSE_MS)
}

/// Remembers recently hit entities so pass-through projectiles damage each
/// one at most once per window.
#[derive(Clone, Debug, PartialEq)]
pub struct HitWindow {
    window_ms: u32,
    recent: Vec<(EntityId, Countdown)>,
}

impl HitWindow {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            recent: Vec::new(),
        }
    }

    /// Records a hit on `id`. False if `id` was already hit within the window.
    pub fn try_hit(&mut self, id: EntityId) -> bool {
        if self.recent.iter().any(|(hit, _)| *hit == id) {
            return false;
        }
        self.recent.push((id, Countdown::new(self.window_ms)));
        true
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.recent
            .retain_mut(|(_, countdown)| !countdown.tick(elapsed_ms));
    }
}

/// Collision policy of a projectile kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectileBehavior {
    /// Damage and disappear. A hit player is also stunned for `stun_ms`.
    Impact { stun_ms: u32 },
    /// Pass through, damaging and poisoning each target again once its
    /// window has passed.
    Cloud { window: HitWindow },
    /// Pass through, damage, and fly off in a random direction.
    Deflect { window: HitWindow },
}

/// Lifecycle and collision response of one projectile.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileController {
    age_ms: u32,
    max_age_ms: u32,
    damage: u32,
    behavior: ProjectileBehavior,
}

impl ProjectileController {
    pub fn new(max_age_ms: u32, damage: u32, behavior: ProjectileBehavior) -> Self {
        Self {
            age_ms: 0,
            max_age_ms,
            damage,
            behavior,
        }
    }

    pub fn age_ms(&self) -> u32 {
        self.age_ms
    }

    pub fn max_age_ms(&self) -> u32 {
        self.max_age_ms
    }

    /// Ages the projectile. Returns true once it is past its max age.
    pub fn on_tick(&mut self, elapsed_ms: u32) -> bool {
        self.age_ms = self.age_ms.saturating_add(elapsed_ms);
        if let ProjectileBehavior::Cloud { window } | ProjectileBehavior::Deflect { window } =
            &mut self.behavior
        {
            window.tick(elapsed_ms);
        }
        self.age_ms > self.max_age_ms
    }

    /// Responds to overlapping `enemy`. Returns true if the projectile is consumed.
    pub fn on_enemy_collision(
        &mut self,
        body: &mut WorldEntity,
        enemy: &mut Enemy,
        rng: &mut dyn RngOracle,
        feedback: &mut dyn FeedbackSink,
    ) -> bool {
        let damage = self.damage;
        let hit = |enemy: &mut Enemy, feedback: &mut dyn FeedbackSink| {
            let amount = enemy.take_damage(damage);
            feedback.on_combat(CombatEvent::Damaged {
                target: enemy.id,
                amount,
            });
        };

        match &mut self.behavior {
            ProjectileBehavior::Impact { .. } => {
                hit(enemy, feedback);
                true
            }
            ProjectileBehavior::Cloud { window } => {
                if window.try_hit(enemy.id) {
                    hit(enemy, feedback);
                    if !enemy.is_dead() && enemy.apply_buff(cloud_poison()).is_ok() {
                        feedback.on_combat(CombatEvent::BuffApplied {
                            target: enemy.id,
                            kind: BuffKind::Poison,
                        });
                    }
                }
                false
            }
            ProjectileBehavior::Deflect { window } => {
                if window.try_hit(enemy.id) {
                    hit(enemy, feedback);
                    body.direction = Some(random_direction(rng, body.direction));
                }
                false
            }
        }
    }

    /// Responds to overlapping the player. Returns true if the projectile is consumed.
    pub fn on_player_collision(
        &mut self,
        body: &mut WorldEntity,
        player: &mut PlayerState,
        rng: &mut dyn RngOracle,
        feedback: &mut dyn FeedbackSink,
    ) -> bool {
        let damage = self.damage;
        let hit = |player: &mut PlayerState, feedback: &mut dyn FeedbackSink| {
            let amount = player.take_damage(damage);
            feedback.on_combat(CombatEvent::Damaged {
                target: EntityId::PLAYER,
                amount,
            });
        };

        match &mut self.behavior {
            ProjectileBehavior::Impact { stun_ms } => {
                hit(player, feedback);
                if *stun_ms > 0 {
                    player.stun_for(*stun_ms);
                }
                true
            }
            ProjectileBehavior::Cloud { window } => {
                if window.try_hit(EntityId::PLAYER) {
                    hit(player, feedback);
                    if player.apply_buff(cloud_poison()).is_ok() {
                        feedback.on_combat(CombatEvent::BuffApplied {
                            target: EntityId::PLAYER,
                            kind: BuffKind::Poison,
                        });
                    }
                }
                false
            }
            ProjectileBehavior::Deflect { window } => {
                if window.try_hit(EntityId::PLAYER) {
                    hit(player, feedback);
                    body.direction = Some(random_direction(rng, body.direction));
                }
                false
            }
        }
    }
}

/// Any of the eight directions except `current`.
fn random_direction(rng: &mut dyn RngOracle, current: Option<Direction>) -> Direction {
    let candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| Some(*direction) != current)
        .collect();
    candidates[rng.range(0, candidates.len() as u32 - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::feedback::FeedbackLog;
    use crate::projectile::ProjectileKind;
    use crate::state::{EnemyKind, ResourceMeter, Size, SpriteId, Vec2};

    fn body() -> WorldEntity {
        let mut entity = WorldEntity::new(Vec2::ZERO, Size::new(10.0, 10.0), 0.3, SpriteId(0));
        entity.direction = Some(Direction::Right);
        entity
    }

    fn enemy() -> Enemy {
        crate::testing::enemy(EntityId(3), EnemyKind::Rat, Vec2::ZERO, ResourceMeter::full(50))
    }

    #[test]
    fn impact_damages_and_is_consumed() {
        let mut controller = ProjectileKind::Fireball.controller();
        let mut enemy = enemy();
        let mut log = FeedbackLog::new();

        let consumed =
            controller.on_enemy_collision(&mut body(), &mut enemy, &mut PcgRng::new(1), &mut log);

        assert!(consumed);
        assert_eq!(enemy.health.current, 40);
        assert_eq!(
            log.combat().next(),
            Some(&CombatEvent::Damaged {
                target: EntityId(3),
                amount: 10
            })
        );
    }

    #[test]
    fn cloud_retriggers_after_window() {
        let mut controller = ProjectileKind::PoisonCloud.controller();
        let mut enemy = enemy();
        let mut body = body();
        let mut rng = PcgRng::new(1);
        let mut log = FeedbackLog::new();

        assert!(!controller.on_enemy_collision(&mut body, &mut enemy, &mut rng, &mut log));
        assert!(!controller.on_enemy_collision(&mut body, &mut enemy, &mut rng, &mut log));
        assert_eq!(enemy.health.current, 48);
        assert_eq!(enemy.buffs.count(BuffKind::Poison), 1);

        controller.on_tick(500);
        controller.on_enemy_collision(&mut body, &mut enemy, &mut rng, &mut log);
        assert_eq!(enemy.health.current, 46);
        assert_eq!(enemy.buffs.count(BuffKind::Poison), 2);
    }

    #[test]
    fn deflect_changes_direction_and_passes_through() {
        let mut controller = ProjectileKind::ChaosOrb.controller();
        let mut enemy = enemy();
        let mut body = body();
        let mut log = FeedbackLog::new();

        let consumed =
            controller.on_enemy_collision(&mut body, &mut enemy, &mut PcgRng::new(5), &mut log);

        assert!(!consumed);
        assert_ne!(body.direction, Some(Direction::Right));
        assert!(body.direction.is_some());
        assert_eq!(enemy.health.current, 44);
    }

    #[test]
    fn bolt_hits_player() {
        let mut controller = ProjectileKind::Bolt.controller();
        let mut player = crate::testing::player();
        let mut log = FeedbackLog::new();

        let consumed =
            controller.on_player_collision(&mut body(), &mut player, &mut PcgRng::new(1), &mut log);

        assert!(consumed);
        assert_eq!(player.health.current, player.health.maximum - 4);
        assert!(player.is_stunned());
    }

    #[test]
    fn fireball_never_stuns() {
        let mut controller = ProjectileKind::Fireball.controller();
        let mut player = crate::testing::player();
        let mut log = FeedbackLog::new();

        controller.on_player_collision(&mut body(), &mut player, &mut PcgRng::new(1), &mut log);

        assert!(!player.is_stunned());
    }
}
