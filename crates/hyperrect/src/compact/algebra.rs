//! Region algebra: union, intersection and convex hull of two boxes.
//!
//! Every combinator validates its inputs first (equal dimensions, accuracy
//! not NaN and not negative), derives new corners from clones, and
//! builds the result through the same checks as `Compact::new`. Failures are
//! logged once, under the combinator's name.

use crate::cfg::check_accuracy;
use crate::error::{GeomError, GeomResult};
use crate::logger::{logged, Logger};
use crate::vector::Vector;

use super::region::{Compact, Region};

fn check_pair(a: &Compact, b: &Compact, accuracy: f64) -> GeomResult<()> {
    if a.dim() != b.dim() {
        return Err(GeomError::dims(a.dim(), b.dim()));
    }
    check_accuracy(accuracy)
}

/// The single axis on which `a` and `b` differ, provided they agree within
/// `accuracy` (strictly) on every other axis.
fn collinear_axis(a: &Vector, b: &Vector, accuracy: f64) -> Option<usize> {
    let mut agree = 0usize;
    let mut differing = None;
    for i in 0..a.dim() {
        if (a[i] - b[i]).abs() < accuracy {
            agree += 1;
        } else {
            differing = Some(i);
        }
    }
    if agree + 1 == a.dim() {
        differing
    } else {
        None
    }
}

impl Compact {
    /// Union of two boxes, when it is itself a box.
    ///
    /// - If one box contains the other, the result is a copy of the larger.
    /// - Otherwise the boxes must be stackable: low corners and high corners
    ///   each differ on exactly one axis (beyond `accuracy`), the same axis for
    ///   both pairs, and the boxes must overlap. The result spans both boxes
    ///   along that axis and copies `a` on the others.
    pub fn union(
        a: &Compact,
        b: &Compact,
        accuracy: f64,
        logger: Option<&Logger>,
    ) -> GeomResult<Compact> {
        logged(logger, "Compact::union", union_impl(a, b, accuracy, logger))
    }

    /// Overlap of two intersecting boxes; the result must itself satisfy the
    /// construction invariants (touching boxes yield a degenerate box and fail).
    pub fn intersection(
        a: &Compact,
        b: &Compact,
        accuracy: f64,
        logger: Option<&Logger>,
    ) -> GeomResult<Compact> {
        logged(
            logger,
            "Compact::intersection",
            intersection_impl(a, b, accuracy, logger),
        )
    }

    /// Smallest box enclosing both inputs. No overlap requirement.
    pub fn convex(
        a: &Compact,
        b: &Compact,
        accuracy: f64,
        logger: Option<&Logger>,
    ) -> GeomResult<Compact> {
        logged(logger, "Compact::convex", convex_impl(a, b, accuracy, logger))
    }
}

fn union_impl(
    a: &Compact,
    b: &Compact,
    accuracy: f64,
    logger: Option<&Logger>,
) -> GeomResult<Compact> {
    check_pair(a, b, accuracy)?;
    if b.is_subset(a)? {
        return Ok(a.clone_into_sink(logger));
    }
    if a.is_subset(b)? {
        return Ok(b.clone_into_sink(logger));
    }

    let (low_a, low_b) = (a.low_corner(), b.low_corner());
    let (high_a, high_b) = (a.high_corner(), b.high_corner());
    let low_axis = collinear_axis(low_a, low_b, accuracy)
        .ok_or_else(|| GeomError::not_stackable("low corners differ on more than one axis"))?;
    let high_axis = collinear_axis(high_a, high_b, accuracy)
        .ok_or_else(|| GeomError::not_stackable("high corners differ on more than one axis"))?;
    if low_axis != high_axis {
        return Err(GeomError::not_stackable(format!(
            "low corners differ on axis {low_axis}, high corners on axis {high_axis}"
        )));
    }
    if !a.intersects(b)? {
        return Err(GeomError::Disjoint);
    }

    let axis = low_axis;
    let mut low = a.low();
    let mut high = a.high();
    low.set_coord(axis, low_a[axis].min(low_b[axis]))?;
    high.set_coord(axis, high_a[axis].max(high_b[axis]))?;
    Compact::build(&low, &high, accuracy, logger)
}

fn intersection_impl(
    a: &Compact,
    b: &Compact,
    accuracy: f64,
    logger: Option<&Logger>,
) -> GeomResult<Compact> {
    check_pair(a, b, accuracy)?;
    if !a.intersects(b)? {
        return Err(GeomError::Disjoint);
    }
    let (low_b, high_b) = (b.low_corner(), b.high_corner());
    let mut low = a.low();
    let mut high = a.high();
    for i in 0..a.dim() {
        low.set_coord(i, low[i].max(low_b[i]))?;
        high.set_coord(i, high[i].min(high_b[i]))?;
    }
    Compact::build(&low, &high, accuracy, logger)
}

fn convex_impl(
    a: &Compact,
    b: &Compact,
    accuracy: f64,
    logger: Option<&Logger>,
) -> GeomResult<Compact> {
    check_pair(a, b, accuracy)?;
    let (low_b, high_b) = (b.low_corner(), b.high_corner());
    let mut low = a.low();
    let mut high = a.high();
    for i in 0..a.dim() {
        low.set_coord(i, low[i].min(low_b[i]))?;
        high.set_coord(i, high[i].max(high_b[i]))?;
    }
    Compact::build(&low, &high, accuracy, logger)
}
