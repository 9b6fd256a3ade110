use gridstar_core::Point;

/// Source of the cells a search may step to from a given cell.
pub trait Pather {
    /// Append the cells reachable in one move from `p` to `buf`. The search
    /// clears `buf` before each call.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A [`Pather`] whose moves carry a real-valued cost.
pub trait WeightedPather: Pather {
    /// Cost of the single move `from -> to`. Must be positive and finite;
    /// on a grid this is 1 for a cardinal step and √2 for a diagonal one.
    fn cost(&self, from: Point, to: Point) -> f64;
}

/// A [`WeightedPather`] with a lower bound on the remaining cost, as A* needs.
pub trait AstarPather: WeightedPather {
    /// Estimated cost from `from` to `to`. It must never exceed the cost of
    /// the cheapest actual path, or A* may return a longer one.
    fn estimate(&self, from: Point, to: Point) -> f64;
}
