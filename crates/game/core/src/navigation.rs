//! Enemy-side pathfinding adapter.
//!
//! Bridges world space and the grid: converts entity corners to cells, replans
//! on a fixed cadence, consumes waypoints as the enemy walks, and turns the
//! next waypoint into a movement direction that will not run into anything in
//! the next few milliseconds.
//!
//! Two independent timers drive it: full replans (expensive, every
//! `path_update_interval_ms`) and direction reevaluation (cheap, every
//! `direction_update_interval_ms`, or whenever a waypoint is consumed).

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::grid::{Cell, Footprint, GridPathfinder, OccupancyGrid};
use crate::state::{Direction, EntityId, Rect, Vec2, WorldEntity};
use crate::timer::Timer;

/// Read-only collision queries used for short-horizon movement prediction.
pub trait CollisionOracle {
    /// True if `rect` overlaps blocked terrain or any entity other than `ignore`.
    fn collides(&self, rect: &Rect, ignore: EntityId) -> bool;
}

/// Per-enemy path state. Owned by exactly one mind.
#[derive(Clone, Debug)]
pub struct EnemyPathfinder {
    pathfinder: GridPathfinder,
    path: VecDeque<Vec2>,
    replan: Timer,
    reevaluate: Timer,
    cell_size: f32,
    proximity: f32,
    lookahead_ms: u32,
}

impl EnemyPathfinder {
    pub fn new(grid: Arc<OccupancyGrid>, entity: &WorldEntity, config: &GameConfig) -> Self {
        let footprint = Footprint::covering(entity.size.w, entity.size.h, config.cell_size);
        Self {
            pathfinder: GridPathfinder::new(grid, footprint),
            path: VecDeque::new(),
            replan: Timer::primed(config.path_update_interval_ms),
            reevaluate: Timer::new(config.direction_update_interval_ms),
            cell_size: config.cell_size,
            proximity: config.waypoint_proximity,
            lookahead_ms: config.collision_lookahead_ms,
        }
    }

    /// Cells the agent covers, anchored at its top-left cell.
    pub fn footprint(&self) -> Footprint {
        self.pathfinder.footprint()
    }

    /// Remaining waypoints, next one first.
    pub fn waypoints(&self) -> impl Iterator<Item = &Vec2> {
        self.path.iter()
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    /// Replans towards `goal` when the replan timer fires.
    ///
    /// Returns `Some(found)` on ticks where a replan ran, `None` otherwise.
    pub fn update_path(
        &mut self,
        entity: &WorldEntity,
        goal: Vec2,
        elapsed_ms: u32,
    ) -> Option<bool> {
        if !self.replan.tick(elapsed_ms) {
            return None;
        }
        Some(self.replan_now(entity, goal))
    }

    /// Replaces the path wholesale. An empty path means "no route"; the
    /// caller stops and waits for the next scheduled replan.
    ///
    /// `goal` is where the entity's center should end up. Both ends are
    /// anchored at the cell under the body's top-left corner, matching the
    /// footprint convention of the grid pathfinder.
    pub fn replan_now(&mut self, entity: &WorldEntity, goal: Vec2) -> bool {
        let start = Cell::containing(entity.position, self.cell_size);
        let target = Cell::containing(entity.origin_centered_on(goal), self.cell_size);

        self.path.clear();
        match self.pathfinder.find_path(start, target) {
            Some(cells) => {
                self.path
                    .extend(cells.into_iter().map(|cell| cell.origin(self.cell_size)));
                tracing::debug!(
                    "replanned {:?} -> {:?}: {} waypoints",
                    start,
                    target,
                    self.path.len()
                );
                true
            }
            None => {
                tracing::debug!("no route {:?} -> {:?}", start, target);
                false
            }
        }
    }

    /// Next waypoint to walk towards, consuming the current one when it no
    /// longer needs visiting.
    ///
    /// The front waypoint is dropped when the entity is within the proximity
    /// threshold of it, or when reaching it would mean walking in the opposite
    /// direction of the leg after it (the entity already overshot it). At most
    /// one waypoint is dropped per call.
    pub fn next_waypoint(&mut self, entity: &WorldEntity) -> Option<Vec2> {
        let first = *self.path.front()?;
        let position = entity.position;

        if position.distance(first) < self.proximity {
            self.path.pop_front();
            return self.path.front().copied();
        }

        if let Some(&second) = self.path.get(1) {
            let to_first = first - position;
            let leg = second - first;
            if let (Some(towards), Some(onwards)) = (
                Direction::dominant(to_first.x, to_first.y),
                Direction::dominant(leg.x, leg.y),
            ) && towards.opposite() == onwards
            {
                self.path.pop_front();
                return self.path.front().copied();
            }
        }

        Some(first)
    }

    /// Direction from `entity` towards `destination` that is collision-free
    /// over the lookahead window.
    ///
    /// Tries the dominant axis first, then the minor axis. `None` when both
    /// collide (the enemy stalls this tick) or when it already stands on the
    /// destination.
    pub fn direction_towards(
        &self,
        world: &dyn CollisionOracle,
        id: EntityId,
        entity: &WorldEntity,
        destination: Vec2,
    ) -> Option<Direction> {
        let delta = destination - entity.position;
        let candidates = [
            Direction::dominant(delta.x, delta.y),
            Direction::minor(delta.x, delta.y),
        ];

        candidates.into_iter().flatten().find(|&direction| {
            let rect = entity.projected_rect(direction, self.lookahead_ms);
            !world.collides(&rect, id)
        })
    }

    /// Direction to move this tick while following the path.
    ///
    /// Keeps the current direction between reevaluations unless a waypoint
    /// was consumed. Returns `None` when the path is exhausted.
    pub fn steer(
        &mut self,
        world: &dyn CollisionOracle,
        id: EntityId,
        entity: &WorldEntity,
        elapsed_ms: u32,
    ) -> Option<Direction> {
        let before = self.path.len();
        let waypoint = self.next_waypoint(entity)?;
        let consumed = self.path.len() != before;

        if consumed || self.reevaluate.tick(elapsed_ms) || entity.direction.is_none() {
            self.reevaluate.reset();
            return self.direction_towards(world, id, entity, waypoint);
        }
        entity.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Size, SpriteId};

    struct TerrainOnly {
        grid: Arc<OccupancyGrid>,
        cell_size: f32,
    }

    impl CollisionOracle for TerrainOnly {
        fn collides(&self, rect: &Rect, _ignore: EntityId) -> bool {
            self.grid.rect_blocked(rect, self.cell_size)
        }
    }

    fn enemy_at(x: f32, y: f32) -> WorldEntity {
        WorldEntity::new(Vec2::new(x, y), Size::new(20.0, 20.0), 0.1, SpriteId(0))
    }

    fn adapter(grid: &Arc<OccupancyGrid>) -> EnemyPathfinder {
        EnemyPathfinder::new(Arc::clone(grid), &enemy_at(0.0, 0.0), &GameConfig::default())
    }

    #[test]
    fn update_path_runs_on_its_own_cadence() {
        let grid = Arc::new(OccupancyGrid::open(10, 10));
        let mut nav = adapter(&grid);
        let entity = enemy_at(4.0, 4.0);
        let goal = Vec2::new(210.0, 10.0);

        assert_eq!(nav.update_path(&entity, goal, 16), Some(true));
        assert_eq!(nav.update_path(&entity, goal, 16), None);
        assert_eq!(nav.update_path(&entity, goal, 900), Some(true));
        assert_eq!(nav.waypoints().next(), Some(&Vec2::new(0.0, 0.0)));
        assert_eq!(nav.waypoints().last(), Some(&Vec2::new(192.0, 0.0)));
    }

    #[test]
    fn proximity_pops_one_waypoint_per_call() {
        let grid = Arc::new(OccupancyGrid::open(10, 1));
        let mut nav = adapter(&grid);
        let entity = enemy_at(0.0, 0.0);
        assert!(nav.replan_now(&entity, Vec2::new(300.0, 10.0)));
        assert_eq!(nav.waypoints().count(), 10);

        // (0,0) and (32,0) are both within 50 units, one pop per call.
        assert_eq!(nav.next_waypoint(&entity), Some(Vec2::new(32.0, 0.0)));
        assert_eq!(nav.waypoints().count(), 9);
        assert_eq!(nav.next_waypoint(&entity), Some(Vec2::new(64.0, 0.0)));
        assert_eq!(nav.waypoints().count(), 8);
        // (64,0) is 64 units away: nothing more to drop.
        assert_eq!(nav.next_waypoint(&entity), Some(Vec2::new(64.0, 0.0)));
        assert_eq!(nav.next_waypoint(&entity), Some(Vec2::new(64.0, 0.0)));
        assert_eq!(nav.waypoints().count(), 8);
    }

    #[test]
    fn overshot_waypoint_is_skipped() {
        let grid = Arc::new(OccupancyGrid::open(10, 1));
        let mut nav = adapter(&grid);
        assert!(nav.replan_now(&enemy_at(0.0, 0.0), Vec2::new(300.0, 10.0)));

        // Standing far past the first waypoint: heading back left to reach it
        // and then right along the path is jitter.
        let overshot = enemy_at(100.0, 0.0);
        let before = nav.waypoints().count();
        let next = nav.next_waypoint(&overshot);
        assert_eq!(next, Some(Vec2::new(32.0, 0.0)));
        assert_eq!(nav.waypoints().count(), before - 1);
    }

    #[test]
    fn direction_falls_back_to_secondary_then_stalls() {
        // Wall directly right of the entity's cell.
        let grid = Arc::new(OccupancyGrid::from_rows(&[vec![0, 1, 0], vec![0, 0, 0]]).unwrap());
        let oracle = TerrainOnly {
            grid: Arc::clone(&grid),
            cell_size: 32.0,
        };
        let nav = adapter(&grid);
        let entity = enemy_at(6.0, 6.0);

        let diagonal = nav.direction_towards(&oracle, EntityId(1), &entity, Vec2::new(70.0, 40.0));
        assert_eq!(diagonal, Some(Direction::Down));

        let straight = nav.direction_towards(&oracle, EntityId(1), &entity, Vec2::new(70.0, 6.0));
        assert_eq!(straight, None);

        let open = nav.direction_towards(&oracle, EntityId(1), &entity, Vec2::new(6.0, 40.0));
        assert_eq!(open, Some(Direction::Down));
    }

    fn column_wall(width: usize, height: usize, wall_x: usize, gap_from_y: usize) -> Arc<OccupancyGrid> {
        let rows: Vec<Vec<u8>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| u8::from(x == wall_x && y < gap_from_y))
                    .collect()
            })
            .collect();
        Arc::new(OccupancyGrid::from_rows(&rows).unwrap())
    }

    #[test]
    fn two_cell_agent_plans_from_its_top_left_cell() {
        // Columns 0-1 are a corridor exactly as wide as the body.
        let grid = column_wall(6, 8, 2, 8);
        let body = WorldEntity::new(Vec2::new(20.0, 20.0), Size::new(40.0, 40.0), 0.1, SpriteId(0));
        let goal = Vec2::new(40.0, 200.0);
        assert!(!grid.rect_blocked(&body.rect(), 32.0));
        let mut nav = EnemyPathfinder::new(Arc::clone(&grid), &body, &GameConfig::default());
        assert_eq!(nav.footprint(), Footprint::new(2, 2));

        assert!(nav.replan_now(&body, goal));

        assert_eq!(nav.waypoints().next(), Some(&Vec2::new(0.0, 0.0)));
        assert_eq!(nav.waypoints().last(), Some(&Vec2::new(0.0, 160.0)));
        assert!(nav.waypoints().all(|waypoint| waypoint.x == 0.0));
    }

    #[test]
    fn three_cell_agent_detours_through_a_wide_enough_gap() {
        // Wall in column 3 with a three-row gap at the bottom.
        let grid = column_wall(8, 10, 3, 7);
        let body = WorldEntity::new(Vec2::new(0.0, 0.0), Size::new(90.0, 90.0), 0.1, SpriteId(0));
        let mut nav = EnemyPathfinder::new(Arc::clone(&grid), &body, &GameConfig::default());
        assert_eq!(nav.footprint(), Footprint::new(3, 3));

        // Center of a body standing on cell (4, 0).
        assert!(nav.replan_now(&body, Vec2::new(173.0, 45.0)));

        assert_eq!(nav.waypoints().last(), Some(&Vec2::new(128.0, 0.0)));
        assert!(nav.waypoints().any(|waypoint| waypoint.y == 224.0));
        for waypoint in nav.waypoints() {
            let covered = Rect::new(*waypoint, Size::new(96.0, 96.0));
            assert!(!grid.rect_blocked(&covered, 32.0), "{waypoint} overlaps the wall");
        }
    }

    #[test]
    fn unreachable_goal_leaves_no_path() {
        let grid = Arc::new(OccupancyGrid::from_rows(&[vec![0, 1, 0]]).unwrap());
        let mut nav = adapter(&grid);
        assert!(!nav.replan_now(&enemy_at(0.0, 0.0), Vec2::new(80.0, 10.0)));
        assert!(!nav.has_path());
        assert_eq!(nav.next_waypoint(&enemy_at(0.0, 0.0)), None);
    }
}
