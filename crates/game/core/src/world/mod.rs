//! The tick-driven combat world.
//!
//! [`World::tick`] runs one simulation step in a fixed order: player
//! movement, enemies, projectiles, then buffs and cooldowns. Player input
//! enters through [`World::try_use_ability`] and [`World::try_use_consumable`]
//! between ticks.

mod view;

use std::sync::Arc;

pub use view::{EnemyView, PlayerView, WorldView};

use crate::ability::{self, AbilityAttempt, AbilityContext, AbilityKind, ActivationError};
use crate::config::GameConfig;
use crate::consumable::{self, ConsumableAttempt, ConsumableContext};
use crate::env::{PcgRng, Registry, RegistryError};
use crate::feedback::{CombatEvent, FeedbackSink};
use crate::grid::OccupancyGrid;
use crate::mind::{Mind, MindCommand, MindInput};
use crate::projectile::{Projectile, ProjectileSpawn};
use crate::state::{
    Direction, Enemy, EnemyKind, EntityId, PlayerState, ResourceMeter, Side, Vec2, WorldEntity,
};

/// Notable results of one [`World::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub enemy_deaths: Vec<(EntityId, EnemyKind)>,
    pub projectiles_expired: usize,
    pub player_damage_taken: u32,
}

/// Player, enemies and projectiles on one level.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    grid: Arc<OccupancyGrid>,
    player: PlayerState,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    rng: PcgRng,
    next_id: u32,
}

impl World {
    pub fn new(config: GameConfig, grid: OccupancyGrid, player: PlayerState, seed: u64) -> Self {
        Self {
            config,
            grid: Arc::new(grid),
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            rng: PcgRng::new(seed),
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Arc<OccupancyGrid> {
        &self.grid
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Sets the player's movement direction from input.
    pub fn set_player_direction(&mut self, direction: Option<Direction>) {
        self.player.set_direction(direction);
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawns an enemy with its top-left corner at `position`.
    pub fn spawn_enemy(
        &mut self,
        registry: &Registry,
        kind: EnemyKind,
        position: Vec2,
    ) -> Result<EntityId, RegistryError> {
        let definition = registry.enemy(kind)?;
        let id = self.allocate_id();
        let body = WorldEntity::new(position, definition.size, definition.speed, definition.sprite);
        let mind = Mind::new(
            definition.mind,
            Arc::clone(&self.grid),
            &body,
            &self.config,
            definition.damage,
        );
        self.enemies.push(Enemy::new(
            id,
            kind,
            body,
            ResourceMeter::full(definition.health),
            mind,
        ));
        tracing::info!("spawned {kind} {id} at {position}");
        Ok(id)
    }

    pub fn spawn_projectile(&mut self, spawn: ProjectileSpawn) -> EntityId {
        let id = self.allocate_id();
        self.projectiles.push(Projectile::spawn(id, spawn));
        id
    }

    /// Runs one simulation step of `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32, feedback: &mut dyn FeedbackSink) -> TickReport {
        let mut report = TickReport::default();
        let health_before = self.player.health.current;

        self.move_player(elapsed_ms);
        self.run_enemies(elapsed_ms, feedback);
        self.reap_dead(&mut report, feedback);
        self.run_projectiles(elapsed_ms, &mut report, feedback);
        self.reap_dead(&mut report, feedback);
        self.run_buffs(elapsed_ms, feedback);
        self.reap_dead(&mut report, feedback);

        report.player_damage_taken = health_before.saturating_sub(self.player.health.current);
        report
    }

    fn move_player(&mut self, elapsed_ms: u32) {
        if self.player.is_stunned() || self.player.is_dead() {
            return;
        }
        if let Some(direction) = self.player.entity.direction {
            let next = self.player.entity.projected_rect(direction, elapsed_ms);
            if !self.grid.rect_blocked(&next, self.config.cell_size) {
                self.player.entity.position = next.origin;
            }
        }
    }

    fn run_enemies(&mut self, elapsed_ms: u32, feedback: &mut dyn FeedbackSink) {
        let view = WorldView::capture(
            &self.grid,
            self.config.cell_size,
            &self.player,
            &self.enemies,
        );
        let player_rect = self.player.entity.rect();
        let mut pending = Vec::new();

        for enemy in &mut self.enemies {
            let commands = enemy.mind.control(MindInput {
                view: &view,
                id: enemy.id,
                body: &mut enemy.entity,
                health: &enemy.health,
                rng: &mut self.rng,
                elapsed_ms,
            });
            pending.extend(commands.into_iter().map(|command| (enemy.id, command)));

            if let Some(direction) = enemy.entity.direction {
                let current = enemy.entity.rect();
                let next = enemy.entity.projected_rect(direction, elapsed_ms);
                let walks_into_player =
                    next.intersects(&player_rect) && !current.intersects(&player_rect);
                if !walks_into_player && !self.grid.rect_blocked(&next, self.config.cell_size) {
                    enemy.entity.position = next.origin;
                }
            }
        }

        for (source, command) in pending {
            match command {
                MindCommand::SpawnProjectile(spawn) => {
                    self.spawn_projectile(spawn);
                }
                MindCommand::Heal { target, amount } => {
                    if let Some(ally) = self.enemy_mut(target)
                        && !ally.is_dead()
                    {
                        let amount = ally.heal(amount);
                        feedback.on_combat(CombatEvent::Healed { target, amount });
                    }
                }
                MindCommand::MeleeHit { damage } => {
                    if self.player.is_dead() {
                        continue;
                    }
                    let amount = self.player.take_damage(damage);
                    tracing::debug!("enemy {source} hits player for {amount}");
                    feedback.on_combat(CombatEvent::Damaged {
                        target: EntityId::PLAYER,
                        amount,
                    });
                }
            }
        }
    }

    fn run_projectiles(
        &mut self,
        elapsed_ms: u32,
        report: &mut TickReport,
        feedback: &mut dyn FeedbackSink,
    ) {
        let cell_size = self.config.cell_size;

        for projectile in &mut self.projectiles {
            projectile.entity.advance(elapsed_ms);
            if self.grid.rect_blocked(&projectile.entity.rect(), cell_size) {
                projectile.expired = true;
                continue;
            }

            if projectile.targets(Side::Enemy) {
                for enemy in self.enemies.iter_mut().filter(|enemy| !enemy.is_dead()) {
                    if !projectile.entity.intersects(&enemy.entity) {
                        continue;
                    }
                    if projectile.controller.on_enemy_collision(
                        &mut projectile.entity,
                        enemy,
                        &mut self.rng,
                        feedback,
                    ) {
                        projectile.expired = true;
                        break;
                    }
                }
            }

            if !projectile.expired
                && projectile.targets(Side::Player)
                && !self.player.is_dead()
                && projectile.entity.intersects(&self.player.entity)
                && projectile.controller.on_player_collision(
                    &mut projectile.entity,
                    &mut self.player,
                    &mut self.rng,
                    feedback,
                )
            {
                projectile.expired = true;
            }

            projectile.on_tick(elapsed_ms);
        }

        self.projectiles.retain(|projectile| {
            if projectile.expired {
                report.projectiles_expired += 1;
                feedback.on_combat(CombatEvent::ProjectileExpired {
                    id: projectile.id,
                    kind: projectile.kind,
                });
            }
            !projectile.expired
        });
    }

    fn run_buffs(&mut self, elapsed_ms: u32, feedback: &mut dyn FeedbackSink) {
        for kind in self.player.tick_buffs(elapsed_ms) {
            feedback.on_combat(CombatEvent::BuffEnded {
                target: EntityId::PLAYER,
                kind,
            });
        }
        self.player.tick_cooldowns(elapsed_ms);

        for enemy in &mut self.enemies {
            for kind in enemy.tick_buffs(elapsed_ms) {
                feedback.on_combat(CombatEvent::BuffEnded {
                    target: enemy.id,
                    kind,
                });
            }
        }
    }

    fn reap_dead(&mut self, report: &mut TickReport, feedback: &mut dyn FeedbackSink) {
        self.enemies.retain(|enemy| {
            if enemy.is_dead() {
                tracing::info!("{} {} died", enemy.kind, enemy.id);
                report.enemy_deaths.push((enemy.id, enemy.kind));
                feedback.on_combat(CombatEvent::EnemyDied {
                    id: enemy.id,
                    kind: enemy.kind,
                });
            }
            !enemy.is_dead()
        });
    }

    /// Runs the ability pipeline for the player, then spawns whatever the
    /// effect launched.
    pub fn try_use_ability(
        &mut self,
        kind: AbilityKind,
        registry: &Registry,
        feedback: &mut dyn FeedbackSink,
    ) -> Result<AbilityAttempt, ActivationError> {
        let mut spawns = Vec::new();
        let mut events = Vec::new();
        let attempt = {
            let mut ctx = AbilityContext {
                player: &mut self.player,
                enemies: &mut self.enemies,
                spawns: &mut spawns,
                events: &mut events,
            };
            ability::try_use_ability(kind, &mut ctx, registry, &self.config, feedback)?
        };

        for event in events {
            feedback.on_combat(event);
        }
        for spawn in spawns {
            self.spawn_projectile(spawn);
        }
        let mut report = TickReport::default();
        self.reap_dead(&mut report, feedback);
        Ok(attempt)
    }

    pub fn try_use_consumable(
        &mut self,
        slot: usize,
        registry: &Registry,
        feedback: &mut dyn FeedbackSink,
    ) -> Result<ConsumableAttempt, ActivationError> {
        let mut ctx = ConsumableContext {
            player: &mut self.player,
        };
        consumable::try_use_consumable(slot, &mut ctx, registry, &self.config, feedback)
    }
}
