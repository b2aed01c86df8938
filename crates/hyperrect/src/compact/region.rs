//! `Compact` construction, getters, and the closed-box predicates.

use std::fmt;

use crate::cfg::GeomCfg;
use crate::error::{GeomError, GeomResult};
use crate::logger::{logged, Logger, SinkClient};
use crate::vector::{check_same_dim, Norm, Vector};

use super::grid::{GridIter, Orientation};

/// Closed axis-aligned region described by its two extreme corners.
///
/// Defaults derive every predicate from the corners, so an implementation only
/// has to expose `dim` and the corners. Predicates apply no tolerance.
/// Dimension mismatches are reported to `logger()` as `"<kind>::<predicate>"`.
pub trait Region {
    fn dim(&self) -> usize;
    fn low_corner(&self) -> &Vector;
    fn high_corner(&self) -> &Vector;

    /// Sink predicate failures are reported to, if any.
    fn logger(&self) -> Option<&Logger> {
        None
    }

    /// Operation prefix used in sink records.
    fn kind(&self) -> &'static str {
        "Region"
    }

    /// `low[i] <= point[i] <= high[i]` on every axis.
    fn contains(&self, point: &Vector) -> GeomResult<bool> {
        check_region_dim(self, "contains", point.dim())?;
        Ok(closed_contains(self.low_corner(), self.high_corner(), point))
    }

    /// `other` contains both extreme corners of `self`.
    fn is_subset(&self, other: &dyn Region) -> GeomResult<bool> {
        check_region_dim(self, "is_subset", other.dim())?;
        Ok(other.contains(self.low_corner())? && other.contains(self.high_corner())?)
    }

    /// Every axis interval pair overlaps (closed intervals, touching counts).
    fn intersects(&self, other: &dyn Region) -> GeomResult<bool> {
        check_region_dim(self, "intersects", other.dim())?;
        Ok(overlaps(self, other))
    }
}

#[inline]
fn closed_contains(lo: &Vector, hi: &Vector, point: &Vector) -> bool {
    (0..point.dim()).all(|i| lo[i] <= point[i] && point[i] <= hi[i])
}

// Scans every axis; a single empty interval overlap makes the result false.
fn overlaps(a: &(impl Region + ?Sized), b: &dyn Region) -> bool {
    let (lo_a, hi_a) = (a.low_corner(), a.high_corner());
    let (lo_b, hi_b) = (b.low_corner(), b.high_corner());
    let mut overlap = true;
    for i in 0..a.dim() {
        if lo_a[i].max(lo_b[i]) > hi_a[i].min(hi_b[i]) {
            overlap = false;
        }
    }
    overlap
}

fn check_region_dim(
    region: &(impl Region + ?Sized),
    predicate: &str,
    found: usize,
) -> GeomResult<()> {
    if region.dim() == found {
        return Ok(());
    }
    let op = format!("{}::{predicate}", region.kind());
    logged(region.logger(), &op, Err(GeomError::dims(region.dim(), found)))
}

/// Axis-aligned hyperrectangle `[low, high]`.
///
/// Invariants:
/// - `low.dim() == high.dim() > 0`.
/// - `high[i] - low[i] >= accuracy` on every axis.
/// - `low` and `high` are not equal within `accuracy` under the L1 norm.
/// - Immutable after construction.
#[derive(Clone, Debug)]
pub struct Compact {
    low: Vector,
    high: Vector,
    accuracy: f64,
    sink: Option<SinkClient>,
}

impl Compact {
    /// Validate the corners and build a box owning clones of them.
    ///
    /// Checks, in order: dimension mismatch, per-axis extent below `accuracy`,
    /// `accuracy` NaN or negative, corners equal within `accuracy` (L1).
    /// Failures are logged to `logger` under `"Compact::new"`.
    pub fn new(
        low: &Vector,
        high: &Vector,
        accuracy: f64,
        logger: Option<&Logger>,
    ) -> GeomResult<Self> {
        logged(logger, "Compact::new", Self::build(low, high, accuracy, logger))
    }

    /// `new` with the accuracy taken from `cfg`.
    pub fn from_cfg(
        low: &Vector,
        high: &Vector,
        cfg: &GeomCfg,
        logger: Option<&Logger>,
    ) -> GeomResult<Self> {
        Self::new(low, high, cfg.accuracy, logger)
    }

    /// Unlogged construction shared with the combinators.
    pub(super) fn build(
        low: &Vector,
        high: &Vector,
        accuracy: f64,
        logger: Option<&Logger>,
    ) -> GeomResult<Self> {
        check_corners(low, high, accuracy)?;
        tracing::debug!(dim = low.dim(), accuracy, "compact built");
        Ok(Self {
            low: low.clone(),
            high: high.clone(),
            accuracy,
            sink: logger.map(Logger::register),
        })
    }

    /// Same corners and accuracy, attached to `logger` instead of our sink.
    pub(super) fn clone_into_sink(&self, logger: Option<&Logger>) -> Self {
        Self {
            low: self.low.clone(),
            high: self.high.clone(),
            accuracy: self.accuracy,
            sink: logger.map(Logger::register),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.low.dim()
    }

    #[inline]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Fresh clone of the low corner.
    pub fn low(&self) -> Vector {
        self.low.clone()
    }

    /// Fresh clone of the high corner.
    pub fn high(&self) -> Vector {
        self.high.clone()
    }

    /// Corners equal within `tolerance` (L1) on both ends.
    pub fn approx_eq(&self, other: &Compact, tolerance: f64) -> GeomResult<bool> {
        Ok(Vector::equals(&self.low, &other.low, Norm::L1, tolerance)?
            && Vector::equals(&self.high, &other.high, Norm::L1, tolerance)?)
    }

    /// Forward lattice iterator starting at `low`.
    pub fn begin_iter(&self, step: &Vector) -> GeomResult<GridIter> {
        logged(
            self.logger(),
            "Compact::begin_iter",
            GridIter::new(&self.low, &self.high, step, Orientation::Forward, self.logger()),
        )
    }

    /// Backward lattice iterator starting at `high`.
    pub fn end_iter(&self, step: &Vector) -> GeomResult<GridIter> {
        logged(
            self.logger(),
            "Compact::end_iter",
            GridIter::new(&self.low, &self.high, step, Orientation::Backward, self.logger()),
        )
    }

    /// Number of lattice points a full traversal with `step` visits:
    /// `prod_i (floor((high_i - low_i) / step_i) + 1)`.
    pub fn lattice_len(&self, step: &Vector) -> GeomResult<usize> {
        super::grid::check_step(step, self.dim())?;
        Ok(super::grid::axis_counts(&self.low, &self.high, step)
            .into_iter()
            .fold(1usize, usize::saturating_mul))
    }
}

fn check_corners(low: &Vector, high: &Vector, accuracy: f64) -> GeomResult<()> {
    check_same_dim(low, high)?;
    for i in 0..low.dim() {
        if high[i] - low[i] < accuracy {
            return Err(GeomError::invalid(format!(
                "extent on axis {i} is below accuracy {accuracy}"
            )));
        }
    }
    if accuracy.is_nan() || accuracy < 0.0 {
        return Err(GeomError::invalid("accuracy must be a non-negative number"));
    }
    if Vector::equals(low, high, Norm::L1, accuracy)? {
        return Err(GeomError::invalid("corners coincide within accuracy"));
    }
    Ok(())
}

impl Region for Compact {
    #[inline]
    fn dim(&self) -> usize {
        self.low.dim()
    }

    #[inline]
    fn low_corner(&self) -> &Vector {
        &self.low
    }

    #[inline]
    fn high_corner(&self) -> &Vector {
        &self.high
    }

    /// Sink this box reports to, if any.
    fn logger(&self) -> Option<&Logger> {
        self.sink.as_ref().map(SinkClient::logger)
    }

    fn kind(&self) -> &'static str {
        "Compact"
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.low, self.high)
    }
}
