use std::f64::consts::SQRT_2;

use gridstar_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Exact step count for 4-way movement on an open grid, and the cost of a
/// single axis-aligned step.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    let (dx, dy) = a.abs_delta(b);
    f64::from(dx + dy)
}

/// Octile distance between two points.
///
/// Shortest distance for 8-way movement on an open grid where an axis step
/// costs 1 and a diagonal step costs √2. On adjacent points it is the step
/// cost itself: 1 or √2.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let (dx, dy) = a.abs_delta(b);
    f64::from(dx + dy) + (SQRT_2 - 2.0) * f64::from(dx.min(dy))
}
