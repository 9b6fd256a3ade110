use gridstar_core::Point;

use crate::config::{Connectivity, DiagonalPolicy};

const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

const DIAGONAL: [Point; 4] = [
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Append the 4-directional (cardinal) neighbors of `p` for which `keep`
/// returns `true`.
pub fn cardinal(p: Point, keep: impl Fn(Point) -> bool, buf: &mut Vec<Point>) {
    for d in CARDINAL {
        let n = p + d;
        if keep(n) {
            buf.push(n);
        }
    }
}

/// Append the 8-directional neighbors of `p` for which `keep` returns
/// `true`, applying `policy` to diagonal steps.
///
/// Cardinal neighbors come first, then diagonal ones.
pub fn all(p: Point, policy: DiagonalPolicy, keep: impl Fn(Point) -> bool, buf: &mut Vec<Point>) {
    cardinal(p, &keep, buf);
    for d in DIAGONAL {
        let n = p + d;
        if !keep(n) {
            continue;
        }
        if policy == DiagonalPolicy::NoSqueeze
            && !keep(p.shift(d.x, 0))
            && !keep(p.shift(0, d.y))
        {
            continue;
        }
        buf.push(n);
    }
}

/// Append the neighbors of `p` under `connectivity`.
pub fn expand(
    p: Point,
    connectivity: Connectivity,
    policy: DiagonalPolicy,
    keep: impl Fn(Point) -> bool,
    buf: &mut Vec<Point>,
) {
    match connectivity {
        Connectivity::Four => cardinal(p, keep, buf),
        Connectivity::Eight => all(p, policy, keep, buf),
    }
}
