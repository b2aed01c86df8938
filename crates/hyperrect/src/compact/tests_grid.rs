use super::*;
use crate::error::{ErrorCode, GeomError};
use crate::logger::Logger;
use crate::vector::Vector;
use proptest::prelude::*;

fn v(c: &[f64]) -> Vector {
    Vector::new(c).unwrap()
}

fn unit_square() -> Compact {
    Compact::new(&v(&[0.0, 0.0]), &v(&[1.0, 1.0]), 1e-5, None).unwrap()
}

/// Step until exhaustion; returns every visited point including the start.
fn walk(it: &mut GridIter) -> Vec<Vec<f64>> {
    let mut out = vec![it.point().to_vec()];
    loop {
        match it.step() {
            Ok(()) => out.push(it.point().to_vec()),
            Err(GeomError::Exhausted) => return out,
            Err(e) => panic!("unexpected step error: {e}"),
        }
    }
}

#[test]
fn iterators_start_on_their_corner() {
    let c = unit_square();
    let step = v(&[0.5, 0.5]);
    let fwd = c.begin_iter(&step).unwrap();
    let bwd = c.end_iter(&step).unwrap();
    assert_eq!(fwd.point().as_slice(), &[0.0, 0.0]);
    assert_eq!(bwd.point().as_slice(), &[1.0, 1.0]);
    assert_eq!(fwd.orientation(), Orientation::Forward);
    assert_eq!(bwd.orientation(), Orientation::Backward);
    assert_eq!(fwd.order(), &[0, 1]);
}

#[test]
fn forward_walk_first_axis_fastest() {
    let c = unit_square();
    let mut it = c.begin_iter(&v(&[0.5, 0.5])).unwrap();
    let pts = walk(&mut it);
    assert_eq!(pts.len(), 9);
    assert_eq!(pts.len(), c.lattice_len(&v(&[0.5, 0.5])).unwrap());
    assert_eq!(&pts[..4], &[
        vec![0.0, 0.0],
        vec![0.5, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 0.5],
    ]);
    assert_eq!(pts[8], vec![1.0, 1.0]);
    // parked on the high corner after exhaustion
    assert_eq!(it.point().as_slice(), &[1.0, 1.0]);
}

#[test]
fn backward_walk_mirrors_forward() {
    let c = unit_square();
    let mut it = c.end_iter(&v(&[0.5, 0.5])).unwrap();
    let pts = walk(&mut it);
    assert_eq!(pts.len(), 9);
    assert_eq!(pts[1], vec![0.5, 1.0]);
    assert_eq!(pts[3], vec![1.0, 0.5]);
    assert_eq!(pts[8], vec![0.0, 0.0]);
    assert_eq!(it.point().as_slice(), &[0.0, 0.0]);
}

#[test]
fn step_not_dividing_extent_stops_inside() {
    let c = Compact::new(&v(&[0.0, 0.0]), &v(&[1.0, 2.0]), 1e-5, None).unwrap();
    let step = v(&[0.75, 0.5]);
    let mut it = c.begin_iter(&step).unwrap();
    let pts = walk(&mut it);
    // axis 0: 0, 0.75; axis 1: 0, 0.5, 1, 1.5, 2
    assert_eq!(pts.len(), 10);
    assert_eq!(c.lattice_len(&step).unwrap(), 10);
    assert!(pts.iter().all(|p| p[0] <= 1.0 && p[1] <= 2.0));
}

#[test]
fn set_direction_changes_axis_priority() {
    let c = unit_square();
    let mut it = c.begin_iter(&v(&[0.5, 0.5])).unwrap();
    it.set_direction(&[1, 0]).unwrap();
    assert_eq!(it.order(), &[1, 0]);
    it.step().unwrap();
    assert_eq!(it.point().as_slice(), &[0.0, 0.5]);
    it.step().unwrap();
    it.step().unwrap();
    assert_eq!(it.point().as_slice(), &[0.5, 0.0]);
}

#[test]
fn set_direction_mid_walk_keeps_cursor() {
    let c = unit_square();
    let mut it = c.begin_iter(&v(&[0.5, 0.5])).unwrap();
    it.step().unwrap();
    it.set_direction(&[1, 0]).unwrap();
    assert_eq!(it.point().as_slice(), &[0.5, 0.0]);
    it.step().unwrap();
    assert_eq!(it.point().as_slice(), &[0.5, 0.5]);
}

#[test]
fn set_direction_rejects_bad_orders() {
    let logger = Logger::new();
    let c = Compact::new(&v(&[0.0, 0.0, 0.0]), &v(&[1.0, 1.0, 1.0]), 1e-5, Some(&logger)).unwrap();
    let mut it = c.begin_iter(&v(&[0.5, 0.5, 0.5])).unwrap();

    let dup = it.set_direction(&[0, 0, 1]).unwrap_err();
    assert_eq!(dup.code(), ErrorCode::InvalidParameter);
    let short = it.set_direction(&[0, 1]).unwrap_err();
    assert_eq!(short.code(), ErrorCode::DimensionMismatch);
    let range = it.set_direction(&[0, 1, 3]).unwrap_err();
    assert_eq!(range.code(), ErrorCode::InvalidParameter);
    // rejected orders leave the previous one in place
    assert_eq!(it.order(), &[0, 1, 2]);

    let recs = logger.records();
    assert_eq!(recs.len(), 3);
    assert!(recs.iter().all(|r| r.operation == "GridIter::set_direction"));
}

#[test]
fn exhaustion_is_reported_as_out_of_bounds() {
    let logger = Logger::new();
    let c = Compact::new(&v(&[0.0]), &v(&[1.0]), 1e-5, Some(&logger)).unwrap();
    let mut it = c.begin_iter(&v(&[1.0])).unwrap();
    it.step().unwrap();
    let e = it.step().unwrap_err();
    assert!(matches!(e, GeomError::Exhausted));
    assert_eq!(e.code(), ErrorCode::OutOfBounds);
    let recs = logger.records();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].operation, "GridIter::step");
    assert_eq!(recs[0].code, ErrorCode::OutOfBounds);
}

#[test]
fn invalid_steps_are_rejected() {
    let logger = Logger::new();
    let c = Compact::new(&v(&[0.0, 0.0]), &v(&[1.0, 1.0]), 1e-5, Some(&logger)).unwrap();
    let zero = c.begin_iter(&v(&[0.5, 0.0])).unwrap_err();
    assert_eq!(zero.code(), ErrorCode::InvalidParameter);
    let neg = c.end_iter(&v(&[-0.5, 0.5])).unwrap_err();
    assert_eq!(neg.code(), ErrorCode::InvalidParameter);
    let dim = c.begin_iter(&v(&[0.5])).unwrap_err();
    assert_eq!(dim.code(), ErrorCode::DimensionMismatch);
    assert!(c.lattice_len(&v(&[0.0, 1.0])).is_err());

    let ops: Vec<_> = logger.records().into_iter().map(|r| r.operation).collect();
    assert_eq!(ops, ["Compact::begin_iter", "Compact::end_iter", "Compact::begin_iter"]);
}

#[test]
fn iterator_outlives_its_box() {
    let it = {
        let c = unit_square();
        c.begin_iter(&v(&[1.0, 1.0])).unwrap()
    };
    assert_eq!(it.into_points().count(), 4);
}

#[test]
fn lattice_points_yield_every_point_once() {
    let c = Compact::new(&v(&[0.0, 0.0, 0.0]), &v(&[1.0, 1.0, 2.0]), 1e-5, None).unwrap();
    let step = v(&[1.0, 0.5, 1.0]);
    let pts: Vec<_> = c.end_iter(&step).unwrap().into_points().collect();
    assert_eq!(pts.len(), 2 * 3 * 3);
    assert_eq!(pts.len(), c.lattice_len(&step).unwrap());
    assert_eq!(pts.first().unwrap().as_slice(), &[1.0, 1.0, 2.0]);
    assert_eq!(pts.last().unwrap().as_slice(), &[0.0, 0.0, 0.0]);
    for (i, p) in pts.iter().enumerate() {
        assert!(c.contains(p).unwrap());
        assert!(pts[i + 1..].iter().all(|q| q != p), "duplicate {p}");
    }
}

#[test]
fn lattice_points_is_fused() {
    let c = unit_square();
    let mut pts = c.begin_iter(&v(&[1.0, 1.0])).unwrap().into_points();
    assert_eq!(pts.by_ref().count(), 4);
    assert!(pts.next().is_none());
    assert_eq!(pts.grid().cursor().as_slice(), &[1.0, 1.0]);
}

#[test]
fn decimal_steps_visit_lattice_len_points() {
    for (hi, st) in [(0.3, 0.01), (0.3, 0.05), (1.0, 0.1), (2.5, 0.3)] {
        let c = Compact::new(&v(&[0.0]), &v(&[hi]), 1e-9, None).unwrap();
        let step = v(&[st]);
        let expected = c.lattice_len(&step).unwrap();
        for it in [c.begin_iter(&step).unwrap(), c.end_iter(&step).unwrap()] {
            let pts: Vec<_> = it.into_points().collect();
            assert_eq!(pts.len(), expected, "high {hi}, step {st}");
            assert!(pts.iter().all(|p| c.contains(p).unwrap()));
        }
    }
    // 0.3 / 0.01 divides evenly: the far corner is reached
    let c = Compact::new(&v(&[0.0]), &v(&[0.3]), 1e-9, None).unwrap();
    assert_eq!(c.lattice_len(&v(&[0.01])).unwrap(), 31);
}

#[test]
fn decimal_steps_in_two_dimensions() {
    let c = Compact::new(&v(&[0.0, -0.3]), &v(&[0.3, 0.0]), 1e-9, None).unwrap();
    let step = v(&[0.05, 0.01]);
    let mut it = c.begin_iter(&step).unwrap();
    it.set_direction(&[1, 0]).unwrap();
    let pts = walk(&mut it);
    assert_eq!(pts.len(), c.lattice_len(&step).unwrap());
    // lattice coordinates are offsets from the start corner, not running sums
    assert_eq!(pts[3][1], -0.3 + 3.0 * 0.01);
}

proptest! {
    #[test]
    fn traversal_visits_lattice_len_points(
        axes in prop::collection::vec((-5.0f64..5.0, 0.05f64..3.0, 0.01f64..1.0), 1..4),
        backward in any::<bool>(),
    ) {
        let lo: Vec<f64> = axes.iter().map(|a| a.0).collect();
        let hi: Vec<f64> = axes.iter().map(|a| a.0 + a.1).collect();
        let st: Vec<f64> = axes.iter().map(|a| a.2).collect();
        let c = Compact::new(&v(&lo), &v(&hi), 1e-9, None).unwrap();
        let step = v(&st);
        let it = if backward { c.end_iter(&step) } else { c.begin_iter(&step) }.unwrap();
        let pts: Vec<_> = it.into_points().collect();
        prop_assert_eq!(pts.len(), c.lattice_len(&step).unwrap());
        for p in &pts {
            prop_assert!(c.contains(p).unwrap());
        }
    }
}
