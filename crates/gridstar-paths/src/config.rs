//! Search configuration.

use gridstar_core::Point;

use crate::distance;

/// Movement model, paired with the heuristic that is admissible for it.
///
/// The pairing is fixed: the connectivity's distance function is used both
/// as the A* estimate and as the step cost between adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// 4-way movement scored with Manhattan distance.
    Four,
    /// 8-way movement scored with octile distance.
    #[default]
    Eight,
}

impl Connectivity {
    /// Distance between `a` and `b` under this movement model.
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Four => distance::manhattan(a, b),
            Self::Eight => distance::octile(a, b),
        }
    }

    /// Whether `b` is one legal step from `a`, ignoring obstacles.
    #[inline]
    pub fn is_step(self, a: Point, b: Point) -> bool {
        match self {
            Self::Four => a.is_cardinal_step(b),
            Self::Eight => a.is_king_step(b),
        }
    }
}

/// Rule for diagonal steps between two blocked orthogonal cells.
///
/// Stepping from `(x, y)` to `(x + 1, y + 1)` squeezes between `(x + 1, y)`
/// and `(x, y + 1)`. Only consulted with [`Connectivity::Eight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagonalPolicy {
    /// Any free diagonal neighbour is reachable.
    Always,
    /// A diagonal step is refused when both orthogonal cells are blocked.
    #[default]
    NoSqueeze,
}

/// Options for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub connectivity: Connectivity,
    pub diagonal_policy: DiagonalPolicy,
}

impl SearchConfig {
    /// 4-way movement with Manhattan distance.
    pub const fn four_way() -> Self {
        Self {
            connectivity: Connectivity::Four,
            diagonal_policy: DiagonalPolicy::NoSqueeze,
        }
    }

    /// 8-way movement with octile distance and the given squeeze rule.
    pub const fn eight_way(diagonal_policy: DiagonalPolicy) -> Self {
        Self {
            connectivity: Connectivity::Eight,
            diagonal_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_diagonal_movement() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.connectivity, Connectivity::Eight);
        assert_eq!(cfg.diagonal_policy, DiagonalPolicy::NoSqueeze);
        assert_eq!(cfg, SearchConfig::eight_way(DiagonalPolicy::NoSqueeze));
    }

    #[test]
    fn connectivity_selects_its_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(2, 2);
        assert_eq!(Connectivity::Four.distance(a, b), 4.0);
        assert!((Connectivity::Eight.distance(a, b) - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn connectivity_steps() {
        let a = Point::new(1, 1);
        assert!(Connectivity::Four.is_step(a, Point::new(1, 0)));
        assert!(!Connectivity::Four.is_step(a, Point::new(2, 2)));
        assert!(Connectivity::Eight.is_step(a, Point::new(2, 2)));
        assert!(!Connectivity::Eight.is_step(a, a));
    }
}
