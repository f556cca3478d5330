//! Support mind: volleys in four directions, heals hurt allies, drifts around.

use std::sync::Arc;

use super::melee::wander;
use super::{MindCommand, MindInput};
use crate::config::GameConfig;
use crate::grid::OccupancyGrid;
use crate::navigation::{CollisionOracle, EnemyPathfinder};
use crate::projectile::{ProjectileKind, ProjectileSpawn};
use crate::state::{Direction, Side, WorldEntity};
use crate::timer::Timer;

const VOLLEY_MS: u32 = 2_500;
const HEAL_SCAN_MS: u32 = 3_000;
const WANDER_MS: u32 = 1_200;
pub const HEAL_RADIUS: f32 = 200.0;
pub const HEAL_AMOUNT: u32 = 5;
/// Beyond this distance the mind walks towards the player instead of drifting.
const ENGAGE_DISTANCE: f32 = 300.0;

#[derive(Clone, Debug)]
pub struct SupportMind {
    nav: EnemyPathfinder,
    volley: Timer,
    heal_scan: Timer,
    wander: Timer,
}

impl SupportMind {
    pub fn new(grid: Arc<OccupancyGrid>, body: &WorldEntity, config: &GameConfig) -> Self {
        Self {
            nav: EnemyPathfinder::new(grid, body, config),
            volley: Timer::new(VOLLEY_MS),
            heal_scan: Timer::new(HEAL_SCAN_MS),
            wander: Timer::new(WANDER_MS),
        }
    }

    pub fn pathfinder(&self) -> &EnemyPathfinder {
        &self.nav
    }

    pub fn control(&mut self, input: MindInput<'_, '_>) -> Vec<MindCommand> {
        let MindInput {
            view,
            id,
            body,
            rng,
            elapsed_ms,
            ..
        } = input;
        let player = *view.player();
        let center = body.center();
        let mut commands = Vec::new();

        if self.volley.tick(elapsed_ms) && !player.invisible {
            commands.extend(Direction::CARDINAL.into_iter().map(|direction| {
                MindCommand::SpawnProjectile(ProjectileSpawn {
                    kind: ProjectileKind::Bolt,
                    side: Side::Enemy,
                    origin: center,
                    direction,
                })
            }));
        }

        if self.heal_scan.tick(elapsed_ms)
            && let Some(ally) = view.enemies().iter().find(|ally| {
                ally.id != id
                    && !ally.health.is_empty()
                    && !ally.health.is_full()
                    && ally.rect.center().distance(center) <= HEAL_RADIUS
            })
        {
            tracing::debug!("enemy {id} heals {}", ally.id);
            commands.push(MindCommand::Heal {
                target: ally.id,
                amount: HEAL_AMOUNT,
            });
        }

        let wander_now = self.wander.tick(elapsed_ms);
        if !player.invisible && player.center().distance(center) > ENGAGE_DISTANCE {
            if self.nav.update_path(body, player.center(), elapsed_ms) == Some(false) {
                self.nav.clear_path();
            }
            body.direction = self.nav.steer(view, id, body, elapsed_ms);
        } else if wander_now {
            self.nav.clear_path();
            body.direction = wander(rng).filter(|direction| {
                !view.collides(&body.projected_rect(*direction, WANDER_MS / 4), id)
            });
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{EnemyKind, EntityId, ResourceMeter, Size, SpriteId, Vec2};
    use crate::testing;
    use crate::world::WorldView;

    fn shaman(at: Vec2) -> WorldEntity {
        WorldEntity::new(at, Size::new(24.0, 24.0), 0.06, SpriteId(0))
    }

    #[test]
    fn volley_fires_four_bolts() {
        let grid = Arc::new(OccupancyGrid::open(20, 20));
        let mut body = shaman(Vec2::new(100.0, 100.0));
        let mut mind = SupportMind::new(Arc::clone(&grid), &body, &GameConfig::default());
        let mut player = testing::player();
        player.entity.position = Vec2::new(200.0, 100.0);
        let view = WorldView::capture(&grid, 32.0, &player, &[]);
        let mut rng = PcgRng::new(3);

        let commands = mind.control(MindInput {
            view: &view,
            id: EntityId(1),
            body: &mut body,
            health: &ResourceMeter::full(12),
            rng: &mut rng,
            elapsed_ms: VOLLEY_MS,
        });

        let directions: Vec<Direction> = commands
            .iter()
            .filter_map(|command| match command {
                MindCommand::SpawnProjectile(spawn) => {
                    assert_eq!(spawn.side, Side::Enemy);
                    assert_eq!(spawn.kind, ProjectileKind::Bolt);
                    Some(spawn.direction)
                }
                _ => None,
            })
            .collect();
        assert_eq!(directions, Direction::CARDINAL.to_vec());
    }

    #[test]
    fn heals_first_hurt_ally_in_radius() {
        let grid = Arc::new(OccupancyGrid::open(20, 20));
        let mut body = shaman(Vec2::new(100.0, 100.0));
        let mut mind = SupportMind::new(Arc::clone(&grid), &body, &GameConfig::default());
        let mut player = testing::player();
        player.entity.position = Vec2::new(200.0, 100.0);
        let allies = [
            testing::enemy(EntityId(2), EnemyKind::Rat, Vec2::new(140.0, 100.0), ResourceMeter::full(6)),
            testing::enemy(EntityId(3), EnemyKind::Rat, Vec2::new(500.0, 500.0), ResourceMeter::new(1, 6)),
            testing::enemy(EntityId(4), EnemyKind::Rat, Vec2::new(100.0, 160.0), ResourceMeter::new(2, 6)),
        ];
        let view = WorldView::capture(&grid, 32.0, &player, &allies);
        let mut rng = PcgRng::new(3);

        let commands = mind.control(MindInput {
            view: &view,
            id: EntityId(1),
            body: &mut body,
            health: &ResourceMeter::full(12),
            rng: &mut rng,
            elapsed_ms: HEAL_SCAN_MS,
        });

        assert!(commands.contains(&MindCommand::Heal {
            target: EntityId(4),
            amount: HEAL_AMOUNT
        }));
        assert!(!commands.iter().any(|command| matches!(
            command,
            MindCommand::Heal {
                target: EntityId(3),
                ..
            }
        )));
    }

    #[test]
    fn walks_towards_distant_player() {
        let grid = Arc::new(OccupancyGrid::open(30, 10));
        let mut body = shaman(Vec2::new(40.0, 40.0));
        let mut mind = SupportMind::new(Arc::clone(&grid), &body, &GameConfig::default());
        let mut player = testing::player();
        player.entity.position = Vec2::new(800.0, 40.0);
        let view = WorldView::capture(&grid, 32.0, &player, &[]);
        let mut rng = PcgRng::new(3);

        mind.control(MindInput {
            view: &view,
            id: EntityId(1),
            body: &mut body,
            health: &ResourceMeter::full(12),
            rng: &mut rng,
            elapsed_ms: 16,
        });

        assert!(mind.pathfinder().has_path());
        assert_eq!(body.direction, Some(Direction::Right));
    }
}
