//! A caller-owned search session: grid, endpoints and the current path.
//!
//! The session is the single place where the grid, start and goal change.
//! Every change that can affect the answer re-runs the search, so
//! [`Session::path`] is always current. Edits take `&mut self`, which keeps
//! them from overlapping any borrow of the grid held by a search.

use gridstar_core::{OccupancyGrid, Point};

use crate::astar::{PathResult, astar_search};
use crate::config::{Connectivity, DiagonalPolicy, SearchConfig};
use crate::error::PathError;
use crate::pather::GridPather;

/// Which endpoint keyboard-style moves act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Endpoint {
    #[default]
    Start,
    Goal,
}

impl Endpoint {
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Start => Self::Goal,
            Self::Goal => Self::Start,
        }
    }
}

/// Configuration for creating a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub goal: Point,
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    /// A 15×15 open grid searched corner to corner with diagonal moves.
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            start: Point::new(0, 0),
            goal: Point::new(14, 14),
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    grid: OccupancyGrid,
    start: Point,
    goal: Point,
    search: SearchConfig,
    active: Endpoint,
    result: PathResult,
}

impl Session {
    /// Create a session over an open grid.
    pub fn new(config: SessionConfig) -> Result<Self, PathError> {
        if config.width <= 0 || config.height <= 0 {
            return Err(PathError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        let grid = OccupancyGrid::new(config.width, config.height);
        Self::with_grid(grid, config.start, config.goal, config.search)
    }

    /// Create a session over an existing grid. Both endpoints must be free,
    /// in bounds and distinct.
    pub fn with_grid(
        grid: OccupancyGrid,
        start: Point,
        goal: Point,
        search: SearchConfig,
    ) -> Result<Self, PathError> {
        if grid.bounds().is_empty() {
            return Err(PathError::InvalidDimensions {
                width: grid.width(),
                height: grid.height(),
            });
        }
        check_placement(&grid, start, goal)?;
        check_placement(&grid, goal, start)?;
        let mut session = Self {
            grid,
            start,
            goal,
            search,
            active: Endpoint::Start,
            result: PathResult::default(),
        };
        session.update();
        Ok(session)
    }

    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Position of `endpoint`.
    #[inline]
    pub fn endpoint(&self, endpoint: Endpoint) -> Point {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::Goal => self.goal,
        }
    }

    /// The current path from start to goal; empty if none exists.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.result.path
    }

    /// The current path with its cost and expansion count.
    #[inline]
    pub fn result(&self) -> &PathResult {
        &self.result
    }

    /// Connectivity and diagonal policy used for every re-plan.
    #[inline]
    pub fn search_config(&self) -> SearchConfig {
        self.search
    }

    /// The endpoint that [`move_active`](Self::move_active) moves.
    #[inline]
    pub fn active(&self) -> Endpoint {
        self.active
    }

    pub fn set_active(&mut self, endpoint: Endpoint) {
        self.active = endpoint;
    }

    /// Switch control to the other endpoint and return it.
    pub fn toggle_active(&mut self) -> Endpoint {
        self.active = self.active.other();
        self.active
    }

    /// Flip the obstacle state of `p`.
    ///
    /// The start and goal cells and out-of-bounds positions are left alone.
    /// Returns whether the grid changed.
    pub fn toggle(&mut self, p: Point) -> bool {
        if p == self.start || p == self.goal {
            return false;
        }
        let Some(state) = self.grid.toggle(p) else {
            return false;
        };
        log::debug!("session: {p} is now {state:?}");
        self.update();
        true
    }

    /// Free every cell.
    pub fn clear(&mut self) {
        self.grid.clear();
        log::debug!("session: grid cleared");
        self.update();
    }

    /// Move the start to `p`.
    pub fn set_start(&mut self, p: Point) -> Result<(), PathError> {
        self.place(Endpoint::Start, p)
    }

    /// Move the goal to `p`.
    pub fn set_goal(&mut self, p: Point) -> Result<(), PathError> {
        self.place(Endpoint::Goal, p)
    }

    /// Shift the active endpoint by `(dx, dy)`.
    ///
    /// The move is refused, leaving the session unchanged, if the target is
    /// out of bounds, blocked, or the other endpoint's cell.
    pub fn move_active(&mut self, dx: i32, dy: i32) -> Result<(), PathError> {
        // Saturated coordinates lie outside any grid, so they fail placement.
        let target = self.endpoint(self.active).saturating_shift(dx, dy);
        self.place(self.active, target)
    }

    /// Switch between 4-way/Manhattan and 8-way/octile movement.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.set_search_config(SearchConfig {
            connectivity,
            ..self.search
        });
    }

    pub fn set_diagonal_policy(&mut self, diagonal_policy: DiagonalPolicy) {
        self.set_search_config(SearchConfig {
            diagonal_policy,
            ..self.search
        });
    }

    pub fn set_search_config(&mut self, search: SearchConfig) {
        if search == self.search {
            return;
        }
        self.search = search;
        self.update();
    }

    fn place(&mut self, endpoint: Endpoint, p: Point) -> Result<(), PathError> {
        check_placement(&self.grid, p, self.endpoint(endpoint.other()))?;
        match endpoint {
            Endpoint::Start => self.start = p,
            Endpoint::Goal => self.goal = p,
        }
        log::debug!("session: {endpoint:?} moved to {p}");
        self.update();
        Ok(())
    }

    fn update(&mut self) {
        let pather = GridPather::new(&self.grid, self.search);
        self.result = astar_search(&pather, self.start, self.goal);
        log::debug!("session: {} -> {}: {}", self.start, self.goal, self.result);
    }
}

/// Check that an endpoint may sit at `p` while the other one is at `other`.
fn check_placement(grid: &OccupancyGrid, p: Point, other: Point) -> Result<(), PathError> {
    if !grid.contains(p) {
        return Err(PathError::OutOfBounds(p));
    }
    if !grid.is_free(p) {
        return Err(PathError::Blocked(p));
    }
    if p == other {
        return Err(PathError::EndpointCollision(p));
    }
    Ok(())
}
