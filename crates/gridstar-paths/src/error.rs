//! Error type for search entry points and session edits.
//!
//! "No path" is never an error: it is an empty path.

use std::fmt;

use gridstar_core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A start or goal position lies outside the grid.
    OutOfBounds(Point),
    /// An endpoint was placed on a blocked cell.
    Blocked(Point),
    /// Start and goal would occupy the same cell.
    EndpointCollision(Point),
    /// A grid must be at least 1×1.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::Blocked(p) => write!(f, "cell {p} is blocked"),
            Self::EndpointCollision(p) => {
                write!(f, "start and goal cannot both be at {p}")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for PathError {}
