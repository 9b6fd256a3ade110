use std::collections::HashMap;
use std::fmt;

use gridstar_core::{OccupancyGrid, Point};

use crate::config::SearchConfig;
use crate::error::PathError;
use crate::pather::GridPather;
use crate::queue::PriorityQueue;
use crate::traits::AstarPather;

/// Outcome of an A* search with metadata.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Cells from start to goal, both included. Empty if no path exists.
    pub path: Vec<Point>,
    /// Sum of step costs along `path`. Zero when no path was found.
    pub cost: f64,
    /// Number of cells popped from the open set.
    pub expanded: usize,
}

impl PathResult {
    fn not_found(expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: 0.0,
            expanded,
        }
    }

    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of cells in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn into_path(self) -> Vec<Point> {
        self.path
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_found() {
            write!(
                f,
                "PathResult {{ found: true, length: {}, cost: {:.3}, expanded: {} }}",
                self.path.len(),
                self.cost,
                self.expanded
            )
        } else {
            write!(f, "PathResult {{ found: false, expanded: {} }}", self.expanded)
        }
    }
}

/// Compute a shortest path from `from` to `to` using A*.
///
/// Returns the full path (including both endpoints) or an empty vector if
/// `to` cannot be reached.
pub fn astar_path<P: AstarPather>(pather: &P, from: Point, to: Point) -> Vec<Point> {
    astar_search(pather, from, to).path
}

/// A* search with the path cost and expansion count.
///
/// All search state (`g_score`, `came_from`, the open set) lives in this
/// call and is dropped on return. If `from == to` the first pop reaches the
/// goal and the path is `[from]`.
pub fn astar_search<P: AstarPather>(pather: &P, from: Point, to: Point) -> PathResult {
    let mut open: PriorityQueue<Point> = PriorityQueue::new();
    let mut g_score: HashMap<Point, f64> = HashMap::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();

    open.insert(from, pather.estimate(from, to));
    g_score.insert(from, 0.0);

    let mut nbuf = Vec::with_capacity(8);
    let mut expanded = 0;

    while let Some(current) = open.pop_min() {
        expanded += 1;

        if current == to {
            let cost = g_score.get(&current).copied().unwrap_or_default();
            let path = reconstruct_path(&came_from, current);
            log::debug!(
                "astar {from} -> {to}: found, {} cells, cost {cost:.3}, {expanded} expanded",
                path.len()
            );
            return PathResult {
                path,
                cost,
                expanded,
            };
        }

        let Some(&current_g) = g_score.get(&current) else {
            continue;
        };
        log::trace!("astar expand {current} g={current_g:.3}");

        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let tentative_g = current_g + pather.cost(current, np);
            if g_score.get(&np).is_some_and(|&g| tentative_g >= g) {
                continue;
            }
            came_from.insert(np, current);
            g_score.insert(np, tentative_g);
            // Update-or-insert: a queued cell moves to its improved priority.
            open.insert(np, tentative_g + pather.estimate(np, to));
        }
    }

    log::debug!("astar {from} -> {to}: no path, {expanded} expanded");
    PathResult::not_found(expanded)
}

/// Follow `came_from` links back from `current`, returning start→goal order.
fn reconstruct_path(came_from: &HashMap<Point, Point>, mut current: Point) -> Vec<Point> {
    let mut path = vec![current];
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Shortest path on `grid` from `start` to `goal`.
///
/// An unreachable goal gives `Ok` with an empty path, and so does a blocked
/// start unless it is also the goal. Endpoints outside the grid are a caller
/// error and are reported as [`PathError::OutOfBounds`].
pub fn search(
    grid: &OccupancyGrid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Result<Vec<Point>, PathError> {
    search_detailed(grid, start, goal, config).map(PathResult::into_path)
}

/// Like [`search`], returning the full [`PathResult`].
pub fn search_detailed(
    grid: &OccupancyGrid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Result<PathResult, PathError> {
    for p in [start, goal] {
        if !grid.contains(p) {
            return Err(PathError::OutOfBounds(p));
        }
    }
    if start != goal && !grid.is_free(start) {
        log::debug!("astar {start} -> {goal}: start is blocked");
        return Ok(PathResult::not_found(0));
    }
    let pather = GridPather::new(grid, *config);
    Ok(astar_search(&pather, start, goal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Connectivity, DiagonalPolicy};
    use crate::neighbors;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    const CONFIGS: [SearchConfig; 3] = [
        SearchConfig::four_way(),
        SearchConfig::eight_way(DiagonalPolicy::Always),
        SearchConfig::eight_way(DiagonalPolicy::NoSqueeze),
    ];

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// Cost of every reachable cell from `start`, found by relaxing all
    /// edges until nothing changes.
    fn exhaustive_costs(grid: &OccupancyGrid, start: Point, cfg: SearchConfig) -> HashMap<Point, f64> {
        let mut dist = HashMap::new();
        dist.insert(start, 0.0);
        let mut buf = Vec::new();
        loop {
            let mut changed = false;
            for cell in grid.bounds() {
                let Some(&d) = dist.get(&cell) else {
                    continue;
                };
                buf.clear();
                neighbors::expand(cell, cfg.connectivity, cfg.diagonal_policy, |n| grid.is_free(n), &mut buf);
                for &n in &buf {
                    let nd = d + cfg.connectivity.distance(cell, n);
                    if dist.get(&n).is_none_or(|&old| nd < old - EPS) {
                        dist.insert(n, nd);
                        changed = true;
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    fn assert_valid_path(grid: &OccupancyGrid, path: &[Point], start: Point, goal: Point, cfg: SearchConfig) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for w in path.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert!(cfg.connectivity.is_step(a, b), "{a} -> {b} is not a step");
            assert!(grid.is_free(a) && grid.is_free(b), "{a} -> {b} crosses a wall");
            let diagonal = a.x != b.x && a.y != b.y;
            if diagonal && cfg.diagonal_policy == DiagonalPolicy::NoSqueeze {
                assert!(
                    grid.is_free(p(b.x, a.y)) || grid.is_free(p(a.x, b.y)),
                    "{a} -> {b} squeezes between walls"
                );
            }
        }
    }

    fn path_cost(path: &[Point], cfg: SearchConfig) -> f64 {
        path.windows(2)
            .map(|w| cfg.connectivity.distance(w[0], w[1]))
            .sum()
    }

    #[test]
    fn open_grid_diagonal_goes_straight_across() {
        let grid = OccupancyGrid::new(3, 3);
        let cfg = SearchConfig::eight_way(DiagonalPolicy::NoSqueeze);
        let path = search(&grid, p(0, 0), p(2, 2), &cfg).unwrap();
        assert_eq!(path, vec![p(0, 0), p(1, 1), p(2, 2)]);
    }

    #[test]
    fn open_grid_four_way_takes_four_edges() {
        let grid = OccupancyGrid::new(3, 3);
        let cfg = SearchConfig::four_way();
        let result = search_detailed(&grid, p(0, 0), p(2, 2), &cfg).unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(result.cost, 4.0);
        assert_valid_path(&grid, &result.path, p(0, 0), p(2, 2), cfg);
    }

    #[test]
    fn blocked_corridor_has_no_path() {
        let grid = OccupancyGrid::parse(".#.").unwrap();
        let path = search(&grid, p(0, 0), p(2, 0), &SearchConfig::four_way()).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn start_equals_goal_is_single_cell() {
        let mut grid = OccupancyGrid::parse("...\n.#.\n...").unwrap();
        for cfg in CONFIGS {
            for cell in grid.bounds() {
                let result = search_detailed(&grid, cell, cell, &cfg).unwrap();
                assert_eq!(result.path, vec![cell]);
                assert_eq!(result.cost, 0.0);
                assert_eq!(result.expanded, 1);
            }
        }
        grid.fill(gridstar_core::Occupancy::Blocked);
        assert_eq!(search(&grid, p(1, 1), p(1, 1), &SearchConfig::default()).unwrap(), vec![p(1, 1)]);
    }

    #[test]
    fn walled_in_goal_is_unreachable() {
        let grid = OccupancyGrid::parse(
            "\
.....
.###.
.#.#.
.###.
.....",
        )
        .unwrap();
        for cfg in CONFIGS {
            let result = search_detailed(&grid, p(0, 0), p(2, 2), &cfg).unwrap();
            assert!(!result.is_found());
            assert!(result.expanded > 0);
        }
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let grid = OccupancyGrid::parse("..\n.#").unwrap();
        for cfg in CONFIGS {
            assert!(search(&grid, p(0, 0), p(1, 1), &cfg).unwrap().is_empty());
        }
    }

    #[test]
    fn blocked_start_is_unreachable() {
        let grid = OccupancyGrid::parse("#..").unwrap();
        for cfg in CONFIGS {
            let result = search_detailed(&grid, p(0, 0), p(2, 0), &cfg).unwrap();
            assert!(result.path.is_empty());
            assert_eq!(result.expanded, 0);
        }
        assert_eq!(search(&grid, p(0, 0), p(0, 0), &SearchConfig::four_way()).unwrap(), vec![p(0, 0)]);
        // the generic entry point leaves blocking to the pather's neighbours
        let pather = GridPather::new(&grid, SearchConfig::four_way());
        assert_eq!(astar_path(&pather, p(0, 0), p(2, 0)).len(), 3);
    }

    #[test]
    fn fully_blocked_grid_returns_empty() {
        let mut grid = OccupancyGrid::new(4, 4);
        grid.fill(gridstar_core::Occupancy::Blocked);
        for cfg in CONFIGS {
            assert!(search(&grid, p(0, 0), p(3, 3), &cfg).unwrap().is_empty());
        }
    }

    #[test]
    fn wall_forces_a_detour() {
        let grid = OccupancyGrid::parse(
            "\
.....
####.
.....",
        )
        .unwrap();
        let cfg = SearchConfig::four_way();
        let result = search_detailed(&grid, p(0, 0), p(0, 2), &cfg).unwrap();
        assert_valid_path(&grid, &result.path, p(0, 0), p(0, 2), cfg);
        assert_eq!(result.cost, 10.0);
    }

    #[test]
    fn squeeze_policy_changes_the_answer() {
        let grid = OccupancyGrid::parse(".#\n#.").unwrap();
        let always = SearchConfig::eight_way(DiagonalPolicy::Always);
        let strict = SearchConfig::eight_way(DiagonalPolicy::NoSqueeze);
        assert_eq!(search(&grid, p(0, 0), p(1, 1), &always).unwrap(), vec![p(0, 0), p(1, 1)]);
        assert!(search(&grid, p(0, 0), p(1, 1), &strict).unwrap().is_empty());
    }

    #[test]
    fn out_of_bounds_endpoints_are_reported() {
        let grid = OccupancyGrid::new(3, 3);
        let cfg = SearchConfig::default();
        assert_eq!(search(&grid, p(-1, 0), p(2, 2), &cfg), Err(PathError::OutOfBounds(p(-1, 0))));
        assert_eq!(search(&grid, p(0, 0), p(3, 2), &cfg), Err(PathError::OutOfBounds(p(3, 2))));
    }

    #[test]
    fn repeated_searches_are_identical() {
        let grid = OccupancyGrid::parse(
            "\
......
.##...
...#..
.#....
......",
        )
        .unwrap();
        for cfg in CONFIGS {
            let first = search_detailed(&grid, p(0, 0), p(5, 4), &cfg).unwrap();
            let second = search_detailed(&grid, p(0, 0), p(5, 4), &cfg).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn generic_pather_entry_point() {
        let grid = OccupancyGrid::new(5, 1);
        let pather = GridPather::new(&grid, SearchConfig::four_way());
        let path = astar_path(&pather, p(4, 0), p(0, 0));
        assert_eq!(path, vec![p(4, 0), p(3, 0), p(2, 0), p(1, 0), p(0, 0)]);
    }

    #[test]
    fn heuristics_are_admissible_on_open_grids() {
        let grid = OccupancyGrid::new(6, 5);
        for cfg in CONFIGS {
            for a in grid.bounds() {
                let exact = exhaustive_costs(&grid, a, cfg);
                for b in grid.bounds() {
                    let h = cfg.connectivity.distance(a, b);
                    assert!(h <= exact[&b] + EPS, "{a} -> {b}: h={h} exact={}", exact[&b]);
                }
            }
        }
    }

    #[test]
    fn paths_are_optimal_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let w = rng.random_range(1..=6);
            let h = rng.random_range(1..=6);
            let mut grid = OccupancyGrid::new(w, h);
            for cell in grid.bounds() {
                grid.set_blocked(cell, rng.random_bool(0.3));
            }
            let start = p(rng.random_range(0..w), rng.random_range(0..h));
            let goal = p(rng.random_range(0..w), rng.random_range(0..h));
            grid.set_blocked(start, false);
            grid.set_blocked(goal, false);

            for cfg in CONFIGS {
                let exact = exhaustive_costs(&grid, start, cfg);
                let result = search_detailed(&grid, start, goal, &cfg).unwrap();
                match exact.get(&goal) {
                    Some(&best) => {
                        assert_valid_path(&grid, &result.path, start, goal, cfg);
                        assert!((result.cost - best).abs() < EPS, "{grid}\n{cfg:?}: {} vs {best}", result.cost);
                        assert!((path_cost(&result.path, cfg) - result.cost).abs() < EPS);
                    }
                    None => assert!(!result.is_found(), "{grid}\n{cfg:?}: unexpected path"),
                }
            }
        }
    }

    #[test]
    fn connectivity_default_is_eight() {
        assert_eq!(SearchConfig::default().connectivity, Connectivity::Eight);
    }

    #[test]
    fn result_display() {
        let grid = OccupancyGrid::new(2, 1);
        let found = search_detailed(&grid, p(0, 0), p(1, 0), &SearchConfig::four_way()).unwrap();
        assert_eq!(found.to_string(), "PathResult { found: true, length: 2, cost: 1.000, expanded: 2 }");
        let lost = PathResult::not_found(3);
        assert_eq!(lost.to_string(), "PathResult { found: false, expanded: 3 }");
    }
}
