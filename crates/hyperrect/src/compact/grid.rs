//! Lattice iteration inside a box (odometer traversal).
//!
//! Model
//! - The cursor starts at `low` (forward) or `high` (backward).
//! - Each axis keeps an integer lattice index `k`; the coordinate is
//!   `low + k * step` (forward) or `high - k * step` (backward), so a walk
//!   visits exactly `lattice_len` points regardless of rounding in `step`.
//! - `step` visits axes in the configured order. The first axis whose
//!   advanced coordinate stays inside `[low_axis, high_axis]` takes the move;
//!   every axis before it wraps back to its own start bound (`low` forward,
//!   `high` backward) and carries. Earlier axes in the order are the fast
//!   digits.
//! - When all axes wrap, the cursor is parked on the opposite corner (`high`
//!   forward, `low` backward) and `step` returns `GeomError::Exhausted`.
//!   Behaviour of further steps is unspecified; stop iterating.

use std::iter::FusedIterator;

use crate::error::{GeomError, GeomResult};
use crate::logger::{logged, Logger, SinkClient};
use crate::vector::Vector;

/// Walk direction of a `GridIter`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// From `low` towards `high`.
    Forward,
    /// From `high` towards `low`.
    Backward,
}

/// Stateful lattice cursor.
pub trait GridCursor {
    /// Replace the axis priority; `order` must be a permutation of `0..dim`.
    fn set_direction(&mut self, order: &[usize]) -> GeomResult<()>;
    /// Advance to the next lattice point, or signal `Exhausted`.
    fn step(&mut self) -> GeomResult<()>;
    /// Clone of the current lattice point.
    fn point(&self) -> Vector;
}

/// Lattice iterator bound to one box.
///
/// Invariants:
/// - `step[i] > 0` for every axis.
/// - `order` is a permutation of `0..dim`.
/// - `low`, `high`, `step` are private clones; only `cursor`, `index` and
///   `order` change.
/// - `index[i] < counts[i]`, and until exhaustion `cursor[i]` is the lattice
///   coordinate of `index[i]` on axis `i`.
#[derive(Clone, Debug)]
pub struct GridIter {
    low: Vector,
    high: Vector,
    step: Vector,
    cursor: Vector,
    index: Vec<usize>,
    counts: Vec<usize>,
    order: Vec<usize>,
    orientation: Orientation,
    sink: Option<SinkClient>,
}

/// Step must match the box dimension and be strictly positive on every axis.
pub(super) fn check_step(step: &Vector, dim: usize) -> GeomResult<()> {
    if step.dim() != dim {
        return Err(GeomError::dims(dim, step.dim()));
    }
    if let Some(axis) = step.iter().position(|&s| s <= 0.0) {
        return Err(GeomError::invalid(format!(
            "step on axis {axis} must be positive"
        )));
    }
    Ok(())
}

/// Lattice points per axis: `floor((high_i - low_i) / step_i) + 1`.
pub(super) fn axis_counts(low: &Vector, high: &Vector, step: &Vector) -> Vec<usize> {
    (0..low.dim())
        .map(|i| (((high[i] - low[i]) / step[i]).floor() as usize).saturating_add(1))
        .collect()
}

impl GridIter {
    pub(super) fn new(
        low: &Vector,
        high: &Vector,
        step: &Vector,
        orientation: Orientation,
        logger: Option<&Logger>,
    ) -> GeomResult<Self> {
        check_step(step, low.dim())?;
        let cursor = match orientation {
            Orientation::Forward => low.clone(),
            Orientation::Backward => high.clone(),
        };
        Ok(Self {
            low: low.clone(),
            high: high.clone(),
            step: step.clone(),
            cursor,
            index: vec![0; low.dim()],
            counts: axis_counts(low, high, step),
            order: (0..low.dim()).collect(),
            orientation,
            sink: logger.map(Logger::register),
        })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.low.dim()
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current axis priority (fastest axis first).
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Borrow the current lattice point.
    #[inline]
    pub fn cursor(&self) -> &Vector {
        &self.cursor
    }

    /// Iterator over the remaining lattice points, current point first.
    pub fn into_points(self) -> LatticePoints {
        LatticePoints {
            grid: self,
            done: false,
        }
    }

    fn logger(&self) -> Option<&Logger> {
        self.sink.as_ref().map(SinkClient::logger)
    }

    fn check_order(&self, order: &[usize]) -> GeomResult<()> {
        let dim = self.dim();
        if order.len() != dim {
            return Err(GeomError::dims(dim, order.len()));
        }
        let mut seen = vec![false; dim];
        for &axis in order {
            if axis >= dim {
                return Err(GeomError::invalid(format!(
                    "axis {axis} out of range for dimension {dim}"
                )));
            }
            seen[axis] = true;
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(GeomError::invalid(format!(
                "axis order is not a permutation: axis {missing} missing"
            )));
        }
        Ok(())
    }

    /// Coordinate of lattice index `k` on `axis`, clamped into the box.
    fn coord_at(&self, axis: usize, k: usize) -> f64 {
        let offset = k as f64 * self.step[axis];
        match self.orientation {
            Orientation::Forward => (self.low[axis] + offset).min(self.high[axis]),
            Orientation::Backward => (self.high[axis] - offset).max(self.low[axis]),
        }
    }

    fn advance(&mut self) -> GeomResult<()> {
        for &axis in &self.order {
            if self.index[axis] + 1 < self.counts[axis] {
                self.index[axis] += 1;
                let next = self.coord_at(axis, self.index[axis]);
                return self.cursor.set_coord(axis, next);
            }
            // carry into the next axis
            self.index[axis] = 0;
            let restart = self.coord_at(axis, 0);
            self.cursor.set_coord(axis, restart)?;
        }
        for (k, n) in self.index.iter_mut().zip(&self.counts) {
            *k = n - 1;
        }
        self.cursor = match self.orientation {
            Orientation::Forward => self.high.clone(),
            Orientation::Backward => self.low.clone(),
        };
        Err(GeomError::Exhausted)
    }
}

impl GridCursor for GridIter {
    fn set_direction(&mut self, order: &[usize]) -> GeomResult<()> {
        let checked = self.check_order(order);
        logged(self.logger(), "GridIter::set_direction", checked)?;
        self.order = order.to_vec();
        Ok(())
    }

    fn step(&mut self) -> GeomResult<()> {
        let res = self.advance();
        logged(self.logger(), "GridIter::step", res)
    }

    fn point(&self) -> Vector {
        self.cursor.clone()
    }
}

/// Owning iterator over lattice points; yields the current point, then steps
/// until the grid signals exhaustion.
#[derive(Clone, Debug)]
pub struct LatticePoints {
    grid: GridIter,
    done: bool,
}

impl LatticePoints {
    /// The underlying cursor (parked on the sentinel corner once exhausted).
    pub fn grid(&self) -> &GridIter {
        &self.grid
    }
}

impl Iterator for LatticePoints {
    type Item = Vector;

    fn next(&mut self) -> Option<Vector> {
        if self.done {
            return None;
        }
        let p = self.grid.point();
        if self.grid.advance().is_err() {
            self.done = true;
        }
        Some(p)
    }
}

impl FusedIterator for LatticePoints {}
