//! Melee mind: chase, hit, and run away once when badly hurt.

use std::sync::Arc;

use super::{MindCommand, MindInput};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::grid::OccupancyGrid;
use crate::navigation::EnemyPathfinder;
use crate::state::{Direction, EntityId, Vec2, WorldEntity};
use crate::timer::{Countdown, Timer};
use crate::world::WorldView;

const HEALTH_CHECK_MS: u32 = 500;
const FLEE_DURATION_MS: u32 = 3_000;
const DECISION_MS: u32 = 1_000;
const ATTACK_COOLDOWN_MS: u32 = 1_000;
const FLEE_THRESHOLD_PERCENT: u32 = 50;
const PERTURB_CHANCE_PERCENT: u32 = 10;
/// Extra distance around the body that still counts as touching the player.
const MELEE_REACH: f32 = 16.0;

/// Flee state of a melee mind. Fleeing happens at most once per enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FleeState {
    Init,
    Fleeing,
    StoppedFleeing,
}

/// Inputs of the flee state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleeTrigger {
    /// Health checked at or below the flee threshold.
    LowHealth,
    /// The flee duration ran out.
    FleeTimeout,
}

impl FleeState {
    /// Transition table; triggers that do not apply leave the state as is.
    pub fn on(self, trigger: FleeTrigger) -> Self {
        match (self, trigger) {
            (FleeState::Init, FleeTrigger::LowHealth) => FleeState::Fleeing,
            (FleeState::Fleeing, FleeTrigger::FleeTimeout) => FleeState::StoppedFleeing,
            (state, _) => state,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MeleeMind {
    nav: EnemyPathfinder,
    state: FleeState,
    health_check: Timer,
    flee: Countdown,
    decision: Timer,
    attack: Countdown,
    damage: u32,
    /// Whether the latest replan found a route to the player.
    route: bool,
}

impl MeleeMind {
    pub fn new(
        grid: Arc<OccupancyGrid>,
        body: &WorldEntity,
        config: &GameConfig,
        damage: u32,
    ) -> Self {
        Self {
            nav: EnemyPathfinder::new(grid, body, config),
            state: FleeState::Init,
            health_check: Timer::new(HEALTH_CHECK_MS),
            flee: Countdown::default(),
            decision: Timer::new(DECISION_MS),
            attack: Countdown::default(),
            damage,
            route: false,
        }
    }

    pub fn state(&self) -> FleeState {
        self.state
    }

    pub fn pathfinder(&self) -> &EnemyPathfinder {
        &self.nav
    }

    pub fn control(&mut self, input: MindInput<'_, '_>) -> Vec<MindCommand> {
        let MindInput {
            view,
            id,
            body,
            health,
            rng,
            elapsed_ms,
        } = input;
        let player = *view.player();
        let mut commands = Vec::new();

        self.attack.tick(elapsed_ms);
        if self.state == FleeState::Fleeing && self.flee.tick(elapsed_ms) {
            self.transition(id, FleeTrigger::FleeTimeout);
            // Read below: steering reevaluates at once and a wanderer halts.
            body.direction = None;
        }
        if self.health_check.tick(elapsed_ms)
            && health.ratio_percent() <= FLEE_THRESHOLD_PERCENT
        {
            self.transition(id, FleeTrigger::LowHealth);
        }
        let decide = self.decision.tick(elapsed_ms);

        let to_player = player.center() - body.center();
        let mut chasing = false;
        body.direction = if self.state == FleeState::Fleeing {
            Direction::dominant(to_player.x, to_player.y).map(Direction::opposite)
        } else if player.invisible {
            self.nav.clear_path();
            if decide { wander(rng) } else { body.direction }
        } else {
            chasing = true;
            self.chase(view, id, body, player.center(), elapsed_ms)
        };

        if chasing
            && decide
            && let Some(direction) = body.direction
            && rng.chance(PERTURB_CHANCE_PERCENT)
        {
            let turned = direction.perpendicular(rng.coin());
            tracing::debug!("enemy {id} swerves {direction} -> {turned}");
            body.direction = Some(turned);
        }

        if !player.invisible
            && !self.attack.is_running()
            && body.rect().inflate(MELEE_REACH).intersects(&player.rect)
        {
            commands.push(MindCommand::MeleeHit {
                damage: self.damage,
            });
            self.attack.start(ATTACK_COOLDOWN_MS);
        }

        commands
    }

    fn transition(&mut self, id: EntityId, trigger: FleeTrigger) {
        let next = self.state.on(trigger);
        if next == self.state {
            return;
        }
        tracing::debug!("enemy {id}: {} -> {}", self.state, next);
        if next == FleeState::Fleeing {
            self.flee.start(FLEE_DURATION_MS);
            self.nav.clear_path();
        }
        self.state = next;
    }

    fn chase(
        &mut self,
        view: &WorldView<'_>,
        id: EntityId,
        body: &WorldEntity,
        target: Vec2,
        elapsed_ms: u32,
    ) -> Option<Direction> {
        if let Some(found) = self.nav.update_path(body, target, elapsed_ms) {
            self.route = found;
        }
        if !self.route {
            return None;
        }
        match self.nav.steer(view, id, body, elapsed_ms) {
            Some(direction) => Some(direction),
            // Path walked to the end: close the last stretch directly.
            None if !self.nav.has_path() => {
                let destination = body.origin_centered_on(target);
                self.nav.direction_towards(view, id, body, destination)
            }
            None => None,
        }
    }
}

/// A random cardinal direction, or standing still.
pub(super) fn wander(rng: &mut dyn RngOracle) -> Option<Direction> {
    let pick = rng.range(0, Direction::CARDINAL.len() as u32);
    Direction::CARDINAL.get(pick as usize).copied()
}
