use gridstar_core::{OccupancyGrid, Point};

use crate::config::SearchConfig;
use crate::neighbors;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Binds an [`OccupancyGrid`] to a [`SearchConfig`] for A*.
///
/// Neighbors are the free in-bounds cells reachable under the configured
/// connectivity. Step cost and estimate are both the connectivity's
/// distance function.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a OccupancyGrid,
    config: SearchConfig,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a OccupancyGrid, config: SearchConfig) -> Self {
        Self { grid, config }
    }

    #[inline]
    pub fn grid(&self) -> &'a OccupancyGrid {
        self.grid
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        neighbors::expand(
            p,
            self.config.connectivity,
            self.config.diagonal_policy,
            |n| self.grid.is_free(n),
            buf,
        );
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, from: Point, to: Point) -> f64 {
        self.config.connectivity.distance(from, to)
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self.config.connectivity.distance(from, to)
    }
}
