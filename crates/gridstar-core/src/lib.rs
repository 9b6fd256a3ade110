//! **gridstar-core**: geometry and occupancy types for grid path search.
//!
//! This crate provides the foundational types shared by the *gridstar*
//! crates: the [`Point`] cell position, the [`Range`] rectangle, and the
//! [`OccupancyGrid`] map of free and blocked cells.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{GridIter, Occupancy, OccupancyGrid};
