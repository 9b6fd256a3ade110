//! A* shortest-path search over binary occupancy grids.
//!
//! The pieces, leaves first:
//!
//! - **Distance heuristics** ([`manhattan`], [`octile`])
//! - **Priority queue** with membership lookup and priority updates
//!   ([`PriorityQueue`])
//! - **A\*** over any [`AstarPather`] ([`astar_path`], [`astar_search`]),
//!   or directly over an [`OccupancyGrid`](gridstar_core::OccupancyGrid)
//!   ([`search`])
//! - **Session**: caller-owned grid, endpoints and current path that
//!   re-plans after every edit ([`Session`])
//!
//! Movement is selected by [`Connectivity`]: 4-way with Manhattan distance
//! or 8-way with octile distance. The same distance is the step cost and
//! the heuristic.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step cost |
//! | [`AstarPather`] : [`WeightedPather`] | admissible estimate |

mod astar;
mod config;
mod distance;
mod error;
pub mod neighbors;
mod pather;
mod queue;
mod session;
mod traits;

pub use astar::{PathResult, astar_path, astar_search, search, search_detailed};
pub use config::{Connectivity, DiagonalPolicy, SearchConfig};
pub use distance::{manhattan, octile};
pub use error::PathError;
pub use pather::GridPather;
pub use queue::PriorityQueue;
pub use session::{Endpoint, Session, SessionConfig};
pub use traits::{AstarPather, Pather, WeightedPather};
