//! Finite-dimensional real vectors (dynamic dimension, finite coordinates).
//!
//! Purpose
//! - Coordinate storage for boxes, sets and lattice cursors.
//! - Keep the API explicit: every fallible operation returns `GeomResult`.
//!
//! Invariants
//! - `dim() > 0`.
//! - Every coordinate is finite (no NaN, no ±inf). Arithmetic that would
//!   produce a non-finite coordinate fails with `NotANumber`.

use std::fmt;
use std::ops::Index;

use nalgebra::DVector;

use crate::error::{GeomError, GeomResult};

/// Norm used for tolerance comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Norm {
    /// Sum of absolute coordinates.
    #[default]
    L1,
    /// Euclidean length.
    L2,
    /// Largest absolute coordinate.
    Inf,
}

/// Real vector of fixed, positive dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: DVector<f64>,
}

impl Vector {
    /// Copy `coords` into a new vector.
    pub fn new(coords: &[f64]) -> GeomResult<Self> {
        Self::from_dvector(DVector::from_column_slice(coords))
    }

    /// Take ownership of an nalgebra column vector.
    pub fn from_dvector(data: DVector<f64>) -> GeomResult<Self> {
        if data.is_empty() {
            return Err(GeomError::ZeroDimension);
        }
        if !data.iter().all(|x| x.is_finite()) {
            return Err(GeomError::NotANumber {
                what: "vector coordinate",
            });
        }
        Ok(Self { data })
    }

    /// All-zero vector.
    pub fn zeros(dim: usize) -> GeomResult<Self> {
        Self::from_dvector(DVector::zeros(dim))
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    pub fn coord(&self, index: usize) -> GeomResult<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or(GeomError::IndexOutOfBounds {
                index,
                len: self.dim(),
            })
    }

    pub fn set_coord(&mut self, index: usize, value: f64) -> GeomResult<()> {
        let len = self.dim();
        if !value.is_finite() {
            return Err(GeomError::NotANumber {
                what: "vector coordinate",
            });
        }
        let slot = self
            .data
            .get_mut(index)
            .ok_or(GeomError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.data.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Borrow the underlying nalgebra storage.
    #[inline]
    pub fn as_dvector(&self) -> &DVector<f64> {
        &self.data
    }

    pub fn norm(&self, norm: Norm) -> f64 {
        dnorm(&self.data, norm)
    }

    pub fn add(&self, other: &Vector) -> GeomResult<Vector> {
        check_same_dim(self, other)?;
        Self::from_dvector(&self.data + &other.data)
    }

    pub fn sub(&self, other: &Vector) -> GeomResult<Vector> {
        check_same_dim(self, other)?;
        Self::from_dvector(&self.data - &other.data)
    }

    pub fn scale(&self, factor: f64) -> GeomResult<Vector> {
        if !factor.is_finite() {
            return Err(GeomError::NotANumber {
                what: "scale factor",
            });
        }
        Self::from_dvector(&self.data * factor)
    }

    pub fn dot(&self, other: &Vector) -> GeomResult<f64> {
        check_same_dim(self, other)?;
        let d = self.data.dot(&other.data);
        if d.is_finite() {
            Ok(d)
        } else {
            Err(GeomError::NotANumber { what: "dot product" })
        }
    }

    /// `norm(a - b) < tolerance` (strict). A difference that overflows is an
    /// infinite distance, not an error.
    pub fn equals(a: &Vector, b: &Vector, norm: Norm, tolerance: f64) -> GeomResult<bool> {
        check_same_dim(a, b)?;
        if tolerance.is_nan() {
            return Err(GeomError::NotANumber { what: "tolerance" });
        }
        if tolerance < 0.0 {
            return Err(GeomError::invalid("tolerance must be non-negative"));
        }
        Ok(dnorm(&(&a.data - &b.data), norm) < tolerance)
    }
}

fn dnorm(data: &DVector<f64>, norm: Norm) -> f64 {
    match norm {
        Norm::L1 => data.lp_norm(1),
        Norm::L2 => data.norm(),
        Norm::Inf => data.amax(),
    }
}

#[inline]
pub(crate) fn check_same_dim(a: &Vector, b: &Vector) -> GeomResult<()> {
    if a.dim() != b.dim() {
        return Err(GeomError::dims(a.dim(), b.dim()));
    }
    Ok(())
}

impl Index<usize> for Vector {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}
