//! Axis-aligned hyperrectangles ("compacts"), their lattice iterators, and
//! region algebra (union, intersection, convex hull).
//!
//! Purpose
//! - `Compact` is a closed box `[low, high]` with a construction-time accuracy.
//!   It owns clones of both corners and never aliases caller vectors.
//! - `GridIter` walks the lattice `low + k ⊙ step` (forward) or
//!   `high - k ⊙ step` (backward) inside one box with odometer carries and a
//!   configurable axis priority.
//! - `Compact::{union, intersection, convex}` combine two boxes into a new one
//!   or fail; no partially valid box is ever returned.
//!
//! Assumptions and conventions
//! - Predicates are exact (no tolerance); only construction and the union's
//!   stackability test use the accuracy.
//! - Every failure is reported to the diagnostic sink handed to the factory
//!   (or attached to the box) under the operation name, e.g.
//!   `"Compact::union"`.
//!
//! Code cross-refs: `crate::vector::Vector`, `crate::logger::Logger`

mod algebra;
mod grid;
mod region;

pub use grid::{GridCursor, GridIter, LatticePoints, Orientation};
pub use region::{Compact, Region};

#[cfg(test)]
mod tests_grid;
