//! Tolerance-based unordered collection of vectors.
//!
//! Invariants
//! - All stored vectors share one dimension, fixed by the first insert (or by
//!   `with_dim`) and kept across `clear`.
//! - No two stored vectors are equal within the tolerance/norm used at insert
//!   time; inserting a near-duplicate is a successful no-op.
//!
//! Complexity: every lookup is a linear scan.

use crate::cfg::check_accuracy;
use crate::error::{GeomError, GeomResult};
use crate::vector::{Norm, Vector};

#[derive(Clone, Debug, Default)]
pub struct VectorSet {
    dim: Option<usize>,
    data: Vec<Vector>,
}

impl VectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dim(dim: usize) -> GeomResult<Self> {
        if dim == 0 {
            return Err(GeomError::ZeroDimension);
        }
        Ok(Self {
            dim: Some(dim),
            data: Vec::new(),
        })
    }

    /// `None` until the first insert.
    #[inline]
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector> + '_ {
        self.data.iter()
    }

    fn check_dim(&self, v: &Vector) -> GeomResult<()> {
        match self.dim {
            Some(d) if d != v.dim() => Err(GeomError::dims(d, v.dim())),
            _ => Ok(()),
        }
    }

    /// Insert a clone of `v` unless an equal vector (within `tolerance`) exists.
    pub fn insert(&mut self, v: &Vector, norm: Norm, tolerance: f64) -> GeomResult<()> {
        self.check_dim(v)?;
        check_accuracy(tolerance)?;
        match self.find(v, norm, tolerance) {
            Ok(_) => return Ok(()),
            Err(GeomError::ElementNotFound) => {}
            Err(e) => return Err(e),
        }
        self.dim = Some(v.dim());
        self.data.push(v.clone());
        Ok(())
    }

    /// Remove the element equal to `v` within `tolerance`.
    pub fn erase(&mut self, v: &Vector, norm: Norm, tolerance: f64) -> GeomResult<()> {
        let idx = self.find(v, norm, tolerance)?;
        self.data.swap_remove(idx);
        Ok(())
    }

    pub fn erase_at(&mut self, index: usize) -> GeomResult<()> {
        if index >= self.data.len() {
            return Err(GeomError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            });
        }
        self.data.swap_remove(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Index of the first element equal to `v` within `tolerance`.
    pub fn find(&self, v: &Vector, norm: Norm, tolerance: f64) -> GeomResult<usize> {
        self.check_dim(v)?;
        check_accuracy(tolerance)?;
        for (i, x) in self.data.iter().enumerate() {
            if Vector::equals(x, v, norm, tolerance)? {
                return Ok(i);
            }
        }
        Err(GeomError::ElementNotFound)
    }

    #[inline]
    pub fn contains(&self, v: &Vector, norm: Norm, tolerance: f64) -> bool {
        self.find(v, norm, tolerance).is_ok()
    }

    /// Clone of the element at `index`.
    pub fn get(&self, index: usize) -> GeomResult<Vector> {
        self.data
            .get(index)
            .cloned()
            .ok_or(GeomError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    /// Elements of `a` or `b`.
    pub fn union(a: &VectorSet, b: &VectorSet, norm: Norm, tolerance: f64) -> GeomResult<Self> {
        check_pair(a, b, tolerance)?;
        let mut out = a.clone();
        for v in &b.data {
            out.insert(v, norm, tolerance)?;
        }
        Ok(out)
    }

    /// Elements of `a` not in `b`.
    pub fn difference(
        a: &VectorSet,
        b: &VectorSet,
        norm: Norm,
        tolerance: f64,
    ) -> GeomResult<Self> {
        check_pair(a, b, tolerance)?;
        Ok(a.retain_by(|v| !b.contains(v, norm, tolerance)))
    }

    /// Elements of both `a` and `b` (representatives taken from `a`).
    pub fn intersection(
        a: &VectorSet,
        b: &VectorSet,
        norm: Norm,
        tolerance: f64,
    ) -> GeomResult<Self> {
        check_pair(a, b, tolerance)?;
        Ok(a.retain_by(|v| b.contains(v, norm, tolerance)))
    }

    /// `union(a, b) \ intersection(a, b)`.
    pub fn symmetric_difference(
        a: &VectorSet,
        b: &VectorSet,
        norm: Norm,
        tolerance: f64,
    ) -> GeomResult<Self> {
        let u = Self::union(a, b, norm, tolerance)?;
        let i = Self::intersection(a, b, norm, tolerance)?;
        Self::difference(&u, &i, norm, tolerance)
    }

    fn retain_by(&self, keep: impl Fn(&Vector) -> bool) -> Self {
        Self {
            dim: self.dim,
            data: self.data.iter().filter(|v| keep(*v)).cloned().collect(),
        }
    }
}

fn check_pair(a: &VectorSet, b: &VectorSet, tolerance: f64) -> GeomResult<()> {
    let (Some(da), Some(db)) = (a.dim, b.dim) else {
        return Err(GeomError::ZeroDimension);
    };
    if da != db {
        return Err(GeomError::dims(da, db));
    }
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(GeomError::invalid("tolerance must be a non-negative number"));
    }
    Ok(())
}
