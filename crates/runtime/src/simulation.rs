//! Synchronous simulation driver.
//!
//! [`Simulation`] owns the world of the current level, the registry and the
//! event bus. Callers advance it with [`Simulation::tick`] once per frame and
//! forward player input between ticks; everything the core reports comes out
//! of the bus.

use game_content::Level;
use game_core::{
    AbilityAttempt, AbilityKind, CombatEvent, ConsumableAttempt, Direction, FeedbackSink,
    GameConfig, GameError, Registry, TickReport, World,
};
use tokio::sync::broadcast;

use crate::error::{Result, RuntimeError};
use crate::events::{BusFeedback, Event, EventBus, Topic};

/// Simulation configuration.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    /// Fixed RNG seed; `None` draws one at build time.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 256,
            seed: None,
        }
    }
}

/// One running level plus everything needed to load the next one.
pub struct Simulation {
    world: World,
    registry: Registry,
    bus: EventBus,
    config: GameConfig,
    seed: u64,
    level_name: String,
    elapsed_ms: u64,
}

impl Simulation {
    /// Create a new simulation builder
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Total simulated time since the current level was loaded.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// True once the player died or every enemy is gone.
    pub fn is_over(&self) -> bool {
        self.world.player().is_dead() || self.world.enemies().is_empty()
    }

    /// Advance the current level by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickReport {
        let mut feedback = BusFeedback::new(&self.bus);
        let report = self.world.tick(elapsed_ms, &mut feedback);
        self.elapsed_ms += u64::from(elapsed_ms);

        if report.player_damage_taken > 0 && self.world.player().is_dead() {
            tracing::info!(
                "player died in '{}' after {} ms",
                self.level_name,
                self.elapsed_ms
            );
        }
        report
    }

    pub fn set_player_direction(&mut self, direction: Option<Direction>) {
        self.world.set_player_direction(direction);
    }

    pub fn try_use_ability(&mut self, kind: AbilityKind) -> Result<AbilityAttempt> {
        let mut feedback = BusFeedback::new(&self.bus);
        let attempt = self
            .world
            .try_use_ability(kind, &self.registry, &mut feedback)
            .inspect_err(log_error)?;
        tracing::debug!("ability {kind}: {attempt:?}");
        Ok(attempt)
    }

    pub fn try_use_consumable(&mut self, slot: usize) -> Result<ConsumableAttempt> {
        let mut feedback = BusFeedback::new(&self.bus);
        let attempt = self
            .world
            .try_use_consumable(slot, &self.registry, &mut feedback)
            .inspect_err(log_error)?;
        tracing::debug!("consumable slot {slot}: {attempt:?}");
        Ok(attempt)
    }

    /// Replace the current level.
    ///
    /// The new world gets fresh pathfinders (and therefore fresh occupancy
    /// caches). On error the previous level keeps running.
    pub fn load_level(&mut self, level: Level) -> Result<()> {
        let name = level.name.clone();
        self.world = build_world(&self.config, &self.registry, &self.bus, level, self.seed)?;
        self.level_name = name;
        self.elapsed_ms = 0;
        Ok(())
    }
}

fn log_error(error: &impl GameError) {
    tracing::error!(
        "{} error {}: {}",
        error.severity().as_str(),
        error.error_code(),
        error
    );
}

fn build_world(
    config: &GameConfig,
    registry: &Registry,
    bus: &EventBus,
    level: Level,
    seed: u64,
) -> Result<World> {
    let player = level.player.build(config.cell_size);
    let mut world = World::new(config.clone(), level.grid, player, seed);

    let mut spawned = Vec::with_capacity(level.enemies.len());
    for spawn in &level.enemies {
        let id = world
            .spawn_enemy(registry, spawn.kind, spawn.position(config.cell_size))
            .inspect_err(log_error)?;
        spawned.push(CombatEvent::EnemySpawned {
            id,
            kind: spawn.kind,
        });
    }

    // Only announce spawns of a world that is actually going live.
    let mut feedback = BusFeedback::new(bus);
    for event in spawned {
        feedback.on_combat(event);
    }
    tracing::info!(
        "loaded level '{}' ({}x{}, {} enemies, seed {})",
        level.name,
        world.grid().width(),
        world.grid().height(),
        world.enemies().len(),
        seed
    );
    Ok(world)
}

/// Builder for [`Simulation`] with flexible configuration.
pub struct SimulationBuilder {
    config: SimulationConfig,
    registry: Option<Registry>,
    level: Option<Level>,
}

impl SimulationBuilder {
    fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            registry: None,
            level: None,
        }
    }

    /// Override simulation configuration
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game tunables
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the registry; defaults to [`Registry::standard`].
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set required starting level
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let level = self.level.ok_or(RuntimeError::MissingLevel)?;
        let registry = self.registry.unwrap_or_else(Registry::standard);
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let bus = EventBus::with_capacity(self.config.event_buffer_size);
        let game_config = self.config.game_config;

        let level_name = level.name.clone();
        let world = build_world(&game_config, &registry, &bus, level, seed)?;

        Ok(Simulation {
            world,
            registry,
            bus,
            config: game_config,
            seed,
            level_name,
            elapsed_ms: 0,
        })
    }
}
