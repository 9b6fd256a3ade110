//! The [`OccupancyGrid`] type: a fixed-size map of free and blocked cells.
//!
//! Out-of-bounds positions are never an error. They read as "not free",
//! so neighbour expansion near an edge simply drops them.

use std::fmt;

use crate::error::GridError;
use crate::geom::{Point, Range, RangeIter};

/// Rune used for a free cell in the text form.
pub const FREE_RUNE: char = '.';
/// Rune used for a blocked cell in the text form.
pub const BLOCKED_RUNE: char = '#';

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupancy {
    #[default]
    Free,
    Blocked,
}

impl Occupancy {
    #[inline]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    /// The opposite state.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Free => Self::Blocked,
            Self::Blocked => Self::Free,
        }
    }

    /// The text-form rune for this state.
    #[inline]
    pub const fn rune(self) -> char {
        match self {
            Self::Free => FREE_RUNE,
            Self::Blocked => BLOCKED_RUNE,
        }
    }
}

impl From<bool> for Occupancy {
    /// `true` means blocked.
    fn from(blocked: bool) -> Self {
        if blocked { Self::Blocked } else { Self::Free }
    }
}

/// A `width × height` binary occupancy map.
///
/// The dimensions are fixed at construction. Searches only ever read the
/// grid through `&OccupancyGrid`; every mutating method takes `&mut self`,
/// so the borrow checker keeps edits and in-flight searches apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<Occupancy>,
    bounds: Range,
}

impl OccupancyGrid {
    /// Create a grid with every cell free.
    ///
    /// If either dimension is zero or negative the grid is `0 × 0`, so every
    /// empty grid is equal to the one parsed from an empty string.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = if width <= 0 || height <= 0 {
            Range::default()
        } else {
            Range::new(0, 0, width, height)
        };
        Self {
            cells: vec![Occupancy::Free; bounds.len()],
            bounds,
        }
    }

    /// Parse the text form: one line per row, `.` for free and `#` for
    /// blocked. Surrounding whitespace of the whole string is ignored, but
    /// every line must have the same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::new(0, 0));
        }
        let mut cells = Vec::new();
        let mut width: Option<i32> = None;
        let mut height = 0;
        for (y, line) in s.lines().enumerate() {
            let mut x = 0;
            for ch in line.chars() {
                let state = match ch {
                    FREE_RUNE => Occupancy::Free,
                    BLOCKED_RUNE => Occupancy::Blocked,
                    _ => {
                        return Err(GridError::InvalidRune {
                            ch,
                            pos: Point::new(x, y as i32),
                        });
                    }
                };
                cells.push(state);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(GridError::InconsistentSize {
                        line: y,
                        expected: w as usize,
                        found: x as usize,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }
        let width = width.unwrap_or(0);
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width, height),
        })
    }

    /// The bounding range `[(0, 0), (width, height))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Occupancy> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and not blocked.
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        self.at(p).is_some_and(Occupancy::is_free)
    }

    /// Whether `p` is inside the grid and blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.at(p) == Some(Occupancy::Blocked)
    }

    /// Set the cell at `p`. No-op if `p` is out of bounds.
    pub fn set(&mut self, p: Point, state: Occupancy) {
        if let Some(i) = self.index(p) {
            self.cells[i] = state;
        }
    }

    /// Mark the cell at `p` as blocked or free. No-op if out of bounds.
    #[inline]
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        self.set(p, Occupancy::from(blocked));
    }

    /// Flip the cell at `p` and return its new state, or `None` if out of
    /// bounds.
    pub fn toggle(&mut self, p: Point) -> Option<Occupancy> {
        let i = self.index(p)?;
        self.cells[i] = self.cells[i].toggled();
        Some(self.cells[i])
    }

    /// Set every cell to `state`.
    pub fn fill(&mut self, state: Occupancy) {
        self.cells.fill(state);
    }

    /// Free every cell.
    pub fn clear(&mut self) {
        self.fill(Occupancy::Free);
    }

    /// Number of blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_free()).count()
    }

    /// Row-major iterator over `(Point, Occupancy)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

impl fmt::Display for OccupancyGrid {
    /// Writes the text form accepted by [`OccupancyGrid::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width().max(1) as usize;
        for (y, row) in self.cells.chunks(w).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{}", c.rune())?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for OccupancyGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, Occupancy)` pairs in an [`OccupancyGrid`].
pub struct GridIter<'a> {
    grid: &'a OccupancyGrid,
    inner: RangeIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Point, Occupancy);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        self.grid.at(p).map(|c| (p, c))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a OccupancyGrid {
    type Item = (Point, Occupancy);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

// The grid is stored as its text form so that a deserialized grid always
// has a cell vector matching its bounds.
#[cfg(feature = "serde")]
impl serde::Serialize for OccupancyGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OccupancyGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        OccupancyGrid::parse(&text).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_serializes_as_text() {
        let g = OccupancyGrid::parse("#.\n..").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "\"#.\\n..\"");
        let back: OccupancyGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn empty_grid_survives_round_trip() {
        let g = OccupancyGrid::new(0, 5);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "\"\"");
        let back: OccupancyGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn bad_text_fails_to_deserialize() {
        assert!(serde_json::from_str::<OccupancyGrid>("\"#.\\n.\"").is_err());
    }
}
