//! A* search over the occupancy grid for agents larger than one cell.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use super::{Cell, Footprint, OccupancyGrid};

/// Cells from start to goal, both inclusive. Consecutive cells are 4-adjacent.
pub type Path = Vec<Cell>;

/// Expansion order. Ties in the open set are broken by insertion order, so
/// this order makes equal-cost searches deterministic.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// A* pathfinder bound to one level's grid and one agent footprint.
///
/// Free/blocked answers are memoized per cell for the lifetime of the
/// pathfinder. The grid never changes within a level, so the cache is never
/// invalidated; a new level needs a new pathfinder.
#[derive(Clone, Debug)]
pub struct GridPathfinder {
    grid: Arc<OccupancyGrid>,
    footprint: Footprint,
    free_cache: HashMap<Cell, bool>,
}

impl GridPathfinder {
    pub fn new(grid: Arc<OccupancyGrid>, footprint: Footprint) -> Self {
        Self {
            grid,
            footprint,
            free_cache: HashMap::new(),
        }
    }

    pub fn grid(&self) -> &Arc<OccupancyGrid> {
        &self.grid
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Number of memoized cells.
    pub fn cached_cells(&self) -> usize {
        self.free_cache.len()
    }

    /// True if the agent's whole footprint anchored at `cell` is in bounds and unblocked.
    pub fn is_free(&mut self, cell: Cell) -> bool {
        if let Some(&free) = self.free_cache.get(&cell) {
            return free;
        }

        let free = (0..self.footprint.h as i32).all(|dy| {
            (0..self.footprint.w as i32).all(|dx| !self.grid.is_blocked(cell.offset(dx, dy)))
        });
        self.free_cache.insert(cell, free);
        free
    }

    /// Finds a path from `start` to `goal`.
    ///
    /// When the goal is unreachable, retries once with the goal one cell up.
    /// That retry is a heuristic for "stand just above the target" (targets
    /// often sit against a wall below them); it does not guarantee the
    /// returned path ends next to the original goal.
    pub fn find_path(&mut self, start: Cell, goal: Cell) -> Option<Path> {
        if let Some(path) = self.search(start, goal) {
            return Some(path);
        }

        let above = goal.offset(0, -1);
        tracing::debug!(
            "no path {:?} -> {:?}, retrying with goal {:?}",
            start,
            goal,
            above
        );
        self.search(start, above)
    }

    fn search(&mut self, start: Cell, goal: Cell) -> Option<Path> {
        if start == goal {
            return Some(vec![start]);
        }
        if !self.is_free(goal) {
            return None;
        }

        // (f, h, insertion order) - the order makes ties deterministic.
        let mut open = BinaryHeap::new();
        let mut g_score: HashMap<Cell, u32> = HashMap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut sequence: u64 = 0;

        g_score.insert(start, 0);
        open.push(Reverse((start.manhattan(goal), start.manhattan(goal), sequence, start)));

        while let Some(Reverse((_, _, _, current))) = open.pop() {
            if current == goal {
                return Some(reconstruct(&came_from, current));
            }

            let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let neighbor = current.offset(dx, dy);
                if !self.is_free(neighbor) {
                    continue;
                }

                let tentative = current_g + 1;
                if tentative >= g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                    continue;
                }

                g_score.insert(neighbor, tentative);
                came_from.insert(neighbor, current);
                sequence += 1;
                let h = neighbor.manhattan(goal);
                open.push(Reverse((tentative + h, h, sequence, neighbor)));
            }
        }

        None
    }
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// One-shot search with a fresh cache.
pub fn find_path(
    grid: &Arc<OccupancyGrid>,
    footprint: Footprint,
    start: Cell,
    goal: Cell,
) -> Option<Path> {
    GridPathfinder::new(Arc::clone(grid), footprint).find_path(start, goal)
}
