// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crossings of a pair of curves.
//!
//! Each direction substitutes one curve's coordinates into the other's
//! implicit equation and isolates the real roots of the result. Roots on B
//! are then checked against roots on A, so a crossing is only reported when
//! both curves agree on where it is.
//!
//! The algebra runs on copies of the two curves mapped into a shared local
//! frame, centered on their joint control bounds and scaled to unit size.
//! Parameters are unchanged by that map, so the results are read back on
//! the curves as given.

use smallvec::SmallVec;

use crate::common::clamp_unit;
use crate::{
    match_candidates, match_tolerance, Curve, CurvePoint, Deadline, Degeneracy, IntersectError,
    IntersectOptions, Intersection, PairIntersections, Point, Resultant, SturmSequence,
};

type Candidates<'a> = SmallVec<[CurvePoint<'a>; 9]>;

/// Find the points where `a` and `b` cross.
///
/// Every returned [`Intersection`] has its first point on `a` and its
/// second on `b`. There are never more than nine.
///
/// When one of the curves has degenerated to a line or a parabola, only
/// one implicit equation is used: the other curve's if it is a proper
/// cubic, else that of `a`. The parameter on the curve owning the equation
/// is recovered with [`Curve::locate`].
///
/// # Errors
///
/// - [`IntersectError::NumericOverflow`] if a control point is not finite,
///   the curves span more than the float range, or an intermediate
///   polynomial is not finite.
/// - [`IntersectError::DegenerateCurve`] if a curve is a single point.
/// - [`IntersectError::CoincidentCurves`] if the curves lie on the same
///   implicit curve.
/// - [`IntersectError::BudgetExceeded`] if
///   [`time_budget`](IntersectOptions::time_budget) runs out.
pub fn intersect<'a>(
    a: &'a Curve,
    b: &'a Curve,
    options: &IntersectOptions,
) -> Result<PairIntersections<'a>, IntersectError> {
    if !a.bez().is_finite() || !b.bez().is_finite() {
        return Err(IntersectError::NumericOverflow {
            stage: "curve coefficients",
        });
    }
    let frame = LocalFrame::enclosing(a, b)?;
    let (la, lb) = (frame.curve(a), frame.curve(b));
    if !la.is_finite() || !lb.is_finite() {
        return Err(IntersectError::NumericOverflow {
            stage: "implicit coefficients",
        });
    }
    let deadline = Deadline::after(options.time_budget);
    let local = match (la.degeneracy(), lb.degeneracy()) {
        (Degeneracy::Point, _) | (_, Degeneracy::Point) => {
            return Err(IntersectError::DegenerateCurve(Degeneracy::Point));
        }
        _ if !a.control_bounds().overlaps(b.control_bounds()) => {
            return Ok(PairIntersections::new());
        }
        (Degeneracy::None, Degeneracy::None) => {
            let on_b = candidates(&la, &lb, options, &deadline)?;
            let on_a = candidates(&lb, &la, options, &deadline)?;
            let tolerance = match_tolerance(&la, &lb, options.tolerance_factor);
            match_candidates(&on_a, &on_b, tolerance)
        }
        (degeneracy, Degeneracy::None) => {
            log::debug!("{a} is {degeneracy}, using the implicit form of {b} only");
            locate_on_implicit(&lb, &la, options, &deadline)?
                .iter()
                .map(Intersection::swapped)
                .collect()
        }
        (_, degeneracy) => {
            log::debug!("{b} is {degeneracy}, using the implicit form of {a} only");
            locate_on_implicit(&la, &lb, options, &deadline)?
        }
    };
    let result: PairIntersections<'a> = local
        .iter()
        .map(|x| {
            Intersection::new(
                CurvePoint::new(a, x.first().t()),
                CurvePoint::new(b, x.second().t()),
            )
        })
        .collect();
    log::trace!("{} crossings of {a} and {b}", result.len());
    Ok(result)
}

/// The affine map `p -> (p - origin) * factor` into a pair's local frame.
#[derive(Clone, Copy, Debug)]
struct LocalFrame {
    origin: Point,
    factor: f64,
}

impl LocalFrame {
    /// Center on the joint control bounds and scale the longer side to 1.
    fn enclosing(a: &Curve, b: &Curve) -> Result<Self, IntersectError> {
        let bounds = a.control_bounds().union(b.control_bounds());
        let extent = bounds.max_extent();
        // Both curves are the same single point.
        let factor = if extent > 0.0 { extent.recip() } else { 1.0 };
        let origin = bounds.center();
        if !extent.is_finite() || !factor.is_finite() || !origin.is_finite() {
            return Err(IntersectError::NumericOverflow {
                stage: "local frame",
            });
        }
        Ok(LocalFrame { origin, factor })
    }

    fn curve(&self, c: &Curve) -> Curve {
        Curve::new(c.bez().to_local(self.origin, self.factor))
    }
}

/// Crossings found with the implicit form of `implicit_of` alone.
///
/// The first point of every result is on `implicit_of`.
fn locate_on_implicit<'a>(
    implicit_of: &'a Curve,
    other: &'a Curve,
    options: &IntersectOptions,
    deadline: &Deadline,
) -> Result<PairIntersections<'a>, IntersectError> {
    let tolerance = match_tolerance(implicit_of, other, options.tolerance_factor);
    let mut result = PairIntersections::new();
    for q in candidates(implicit_of, other, options, deadline)? {
        match implicit_of.locate(q.point(), tolerance) {
            Some(s) => result.push(Intersection::new(CurvePoint::new(implicit_of, s), q)),
            None => log::debug!("spurious candidate {q}: not within {tolerance} of {implicit_of}"),
        }
    }
    Ok(result)
}

/// Parameters on `on` where it meets the unbounded implicit curve of
/// `implicit_of`, restricted to `[0, 1]`.
///
/// Roots are isolated on an interval widened by the root accuracy, so that
/// crossings exactly at an endpoint are not lost, then clamped back.
fn candidates<'a>(
    implicit_of: &Curve,
    on: &'a Curve,
    options: &IntersectOptions,
    deadline: &Deadline,
) -> Result<Candidates<'a>, IntersectError> {
    let resultant = Resultant::of_curves(implicit_of, on);
    if !resultant.is_finite() {
        return Err(IntersectError::NumericOverflow { stage: "resultant" });
    }
    let eps = options.coefficient_epsilon;
    let Some(degree) = resultant.degree(eps) else {
        return Err(IntersectError::CoincidentCurves);
    };
    if degree == 0 {
        // A non-zero constant has no roots.
        return Ok(Candidates::new());
    }
    let sturm = SturmSequence::new(resultant.to_poly_dyn(degree), eps)?;
    let acc = options.root_accuracy;
    let roots = sturm.isolate_roots(-acc, 1.0 + acc, acc, deadline)?;
    let mut params: SmallVec<[f64; 9]> = roots
        .into_iter()
        .filter_map(|t| clamp_unit(t, acc))
        .collect();
    // Clamping can merge roots at an endpoint.
    params.dedup();
    Ok(params.into_iter().map(|t| CurvePoint::new(on, t)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::time::Duration;

    fn s_curve() -> Curve {
        Curve::from_coords(0.0, 0.0, 100.0, 0.0, 0.0, 100.0, 100.0, 100.0)
    }

    fn falling() -> Curve {
        Curve::from_coords(0.0, 100.0, 33.0, 66.0, 66.0, 33.0, 100.0, 0.0)
    }

    fn nine_pair() -> (Curve, Curve) {
        (
            Curve::from_coords(0.0, 1000.0, 333.0, -2000.0, 666.0, 3000.0, 1000.0, 0.0),
            Curve::from_coords(0.0, 0.0, 3000.0, 333.0, -2000.0, 666.0, 1000.0, 1000.0),
        )
    }

    fn loops() -> (Curve, Curve) {
        (
            Curve::from_coords(0.0, 1000.0, 1500.0, -300.0, -500.0, -300.0, 750.0, 1000.0),
            Curve::from_coords(0.0, 0.0, 1750.0, 1500.0, -1000.0, 1000.0, 1000.0, 0.0),
        )
    }

    fn find<'a>(a: &'a Curve, b: &'a Curve) -> PairIntersections<'a> {
        intersect(a, b, &IntersectOptions::default()).unwrap()
    }

    fn assert_consistent(found: &[Intersection<'_>], a: &Curve, b: &Curve) {
        let tolerance = match_tolerance(a, b, IntersectOptions::DEFAULT_TOLERANCE_FACTOR);
        for x in found {
            assert!(x.first().is_on(a), "{x}");
            assert!(x.second().is_on(b), "{x}");
            assert!(x.first().same_locus(x.second(), tolerance), "{x}");
            assert!((0.0..=1.0).contains(&x.first().t()), "{x}");
            assert!((0.0..=1.0).contains(&x.second().t()), "{x}");
        }
    }

    #[test]
    fn single_crossing() {
        let (a, b) = (s_curve(), falling());
        let found = find(&a, &b);
        assert_eq!(found.len(), 1);
        assert_consistent(&found, &a, &b);
        assert_abs_diff_eq!(found[0].first().t(), 0.495_000_449_172_848_7, epsilon = 1e-9);
        assert_abs_diff_eq!(found[0].second().t(), 0.503_758_684_401_039_1, epsilon = 1e-9);

        let reversed = find(&b, &a);
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0], found[0]);
        assert!(reversed[0].first().is_on(&b));
    }

    #[test]
    fn nine_crossings() {
        let (p, q) = nine_pair();
        let found = find(&p, &q);
        assert_eq!(found.len(), 9);
        assert_consistent(&found, &p, &q);
        assert_eq!(find(&q, &p).len(), 9);
    }

    #[test]
    fn loops_cross_six_times() {
        let (p, q) = loops();
        let found = find(&p, &q);
        assert_eq!(found.len(), 6);
        assert_consistent(&found, &p, &q);
    }

    #[test]
    fn disjoint_curves() {
        let a = s_curve();
        let far = Curve::from_coords(200.0, 200.0, 300.0, 200.0, 200.0, 300.0, 300.0, 300.0);
        assert!(find(&a, &far).is_empty());
    }

    #[test]
    fn shared_endpoint() {
        let a = s_curve();
        let b = Curve::from_coords(100.0, 100.0, 150.0, 0.0, 200.0, 200.0, 250.0, 100.0);
        let found = find(&a, &b);
        assert_eq!(found.len(), 1);
        assert_abs_diff_eq!(found[0].first().t(), 1.0, epsilon = 1e-9);
        assert!(found[0].second().t() < 1e-9);
        assert!(found[0].point().distance(Point::new(100.0, 100.0)) < 1e-6);
    }

    #[test]
    fn coincident_curves() {
        let a = s_curve();
        let copy = a.clone();
        let opts = IntersectOptions::default();
        assert_eq!(intersect(&a, &a, &opts), Err(IntersectError::CoincidentCurves));
        assert_eq!(intersect(&a, &copy, &opts), Err(IntersectError::CoincidentCurves));
    }

    #[test]
    fn crossing_a_line() {
        let a = s_curve();
        // Collinear control points, unevenly spaced.
        let line = Curve::from_coords(0.0, 100.0, 10.0, 90.0, 20.0, 80.0, 100.0, 0.0);
        assert_eq!(line.degeneracy(), Degeneracy::Line);

        let found = find(&a, &line);
        assert_eq!(found.len(), 1);
        assert_consistent(&found, &a, &line);
        assert_abs_diff_eq!(found[0].first().t(), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(found[0].second().t(), 0.736_082_229_764_353, epsilon = 1e-6);
        assert!(found[0].point().distance(Point::new(50.0, 50.0)) < 1e-6);

        let reversed = find(&line, &a);
        assert_eq!(reversed.len(), 1);
        assert!(reversed[0].first().is_on(&line));
        assert!(reversed[0].second().is_on(&a));
    }

    #[test]
    fn point_curves() {
        let a = s_curve();
        let dot = Curve::from_coords(5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0);
        let opts = IntersectOptions::default();
        assert_eq!(
            intersect(&a, &dot, &opts),
            Err(IntersectError::DegenerateCurve(Degeneracy::Point))
        );
        assert_eq!(
            intersect(&dot, &a, &opts),
            Err(IntersectError::DegenerateCurve(Degeneracy::Point))
        );
    }

    #[test]
    fn crossing_lines() {
        let l1 = Curve::from_coords(0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
        let l2 = Curve::from_coords(0.0, 3.0, 1.0, 2.0, 2.0, 1.0, 3.0, 0.0);
        assert_eq!(l1.degeneracy(), Degeneracy::Line);
        assert_eq!(l2.degeneracy(), Degeneracy::Line);
        let found = find(&l1, &l2);
        assert_eq!(found.len(), 1);
        assert_consistent(&found, &l1, &l2);
        assert_abs_diff_eq!(found[0].first().t(), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(found[0].second().t(), 0.5, epsilon = 1e-9);
        assert!(found[0].point().distance(Point::new(1.5, 1.5)) < 1e-9);

        // The same crossing far from the origin.
        let offset = Point::new(-1000.0, -1000.0);
        let m1 = Curve::new(l1.bez().to_local(offset, 1.0));
        let m2 = Curve::new(l2.bez().to_local(offset, 1.0));
        let found = find(&m1, &m2);
        assert_eq!(found.len(), 1);
        assert!(found[0].point().distance(Point::new(1001.5, 1001.5)) < 1e-9);

        let parallel = Curve::from_coords(0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0);
        assert!(find(&l1, &parallel).is_empty());
        let opts = IntersectOptions::default();
        assert_eq!(intersect(&l1, &l1.clone(), &opts), Err(IntersectError::CoincidentCurves));
    }

    #[test]
    fn parabola_and_line() {
        // Degree-elevated quadratic (0, 0), (50, 100), (100, 0), with x = 100 t.
        let parabola = Curve::from_coords(
            0.0,
            0.0,
            100.0 / 3.0,
            200.0 / 3.0,
            200.0 / 3.0,
            200.0 / 3.0,
            100.0,
            0.0,
        );
        let line = Curve::from_coords(-10.0, 25.0, 30.0, 25.0, 70.0, 25.0, 110.0, 25.0);
        assert_eq!(parabola.degeneracy(), Degeneracy::Quadratic);
        assert_eq!(line.degeneracy(), Degeneracy::Line);

        // y = 200 t (1 - t) meets y = 25 at t = (1 -+ sqrt(1/2)) / 2.
        let t0 = (1.0 - 0.5f64.sqrt()) / 2.0;
        for found in [find(&parabola, &line), find(&line, &parabola)] {
            assert_eq!(found.len(), 2);
            for x in &found {
                assert_abs_diff_eq!(x.point().y, 25.0, epsilon = 1e-6);
            }
        }
        let mut found = find(&parabola, &line);
        assert_consistent(&found, &parabola, &line);
        found.sort_by(|x, y| x.first().t().total_cmp(&y.first().t()));
        assert_abs_diff_eq!(found[0].first().t(), t0, epsilon = 1e-9);
        assert_abs_diff_eq!(found[1].first().t(), 1.0 - t0, epsilon = 1e-9);
        assert_abs_diff_eq!(found[0].second().t(), (100.0 * t0 + 10.0) / 120.0, epsilon = 1e-9);
    }

    #[test]
    fn two_parabolas() {
        let up = Curve::from_coords(
            0.0,
            0.0,
            100.0 / 3.0,
            200.0 / 3.0,
            200.0 / 3.0,
            200.0 / 3.0,
            100.0,
            0.0,
        );
        let down = Curve::from_coords(
            0.0,
            50.0,
            100.0 / 3.0,
            50.0 - 200.0 / 3.0,
            200.0 / 3.0,
            50.0 - 200.0 / 3.0,
            100.0,
            50.0,
        );
        assert_eq!(down.degeneracy(), Degeneracy::Quadratic);
        let found = find(&up, &down);
        assert_eq!(found.len(), 2);
        assert_consistent(&found, &up, &down);
        for x in &found {
            assert_abs_diff_eq!(x.first().t(), x.second().t(), epsilon = 1e-9);
            assert_abs_diff_eq!(x.point().y, 25.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn non_finite_input() {
        let a = s_curve();
        let bad = Curve::from_coords(0.0, 0.0, f64::NAN, 1.0, 2.0, 2.0, 3.0, 0.0);
        assert!(matches!(
            intersect(&a, &bad, &IntersectOptions::default()),
            Err(IntersectError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn zero_budget() {
        let (p, q) = nine_pair();
        let opts = IntersectOptions::default().with_time_budget(Duration::ZERO);
        assert_eq!(intersect(&p, &q, &opts), Err(IntersectError::BudgetExceeded));
    }

    #[test]
    fn extreme_magnitudes() {
        // The span of the curves is beyond the float range.
        let wide = Curve::from_coords(-1e308, 0.0, 0.0, 1.0, 0.0, 1.0, 1e308, 0.0);
        let a = s_curve();
        let opts = IntersectOptions::default();
        for result in [intersect(&a, &wide, &opts), intersect(&wide, &a, &opts)] {
            assert!(matches!(result, Err(IntersectError::NumericOverflow { .. })));
        }

        // Huge but representable coordinates are solved in the local frame.
        let (p, q) = nine_pair();
        let reference = find(&p, &q);
        let hp = Curve::new(p.bez().scale(1e60));
        let hq = Curve::new(q.bez().scale(1e60));
        let found = find(&hp, &hq);
        assert_eq!(found.len(), 9);
        for (x, r) in found.iter().zip(&reference) {
            assert!(!x.point().is_nan(), "{x}");
            assert_abs_diff_eq!(x.first().t(), r.first().t(), epsilon = 1e-7);
            assert_abs_diff_eq!(x.second().t(), r.second().t(), epsilon = 1e-7);
        }
    }

    fn assert_same_params(found: &[Intersection<'_>], reference: &[Intersection<'_>], what: &str) {
        assert_eq!(found.len(), reference.len(), "{what}");
        for (x, r) in found.iter().zip(reference) {
            assert!((x.first().t() - r.first().t()).abs() < 1e-7, "{what}");
            assert!((x.second().t() - r.second().t()).abs() < 1e-7, "{what}");
        }
    }

    #[test]
    fn small_segments_far_from_origin() {
        let (a, b) = (s_curve(), falling());
        let reference = find(&a, &b);
        for (scale, offset) in [(0.1, 1e3), (0.05, 300.0), (0.01, 100.0), (1.0, 1e4), (1.0, 1e5)] {
            // Shrink, then move every point by `offset` along both axes.
            let origin = Point::new(-offset / scale, -offset / scale);
            let ta = Curve::new(a.bez().to_local(origin, scale));
            let tb = Curve::new(b.bez().to_local(origin, scale));
            let found = find(&ta, &tb);
            assert_same_params(&found, &reference, &format!("{scale} at {offset}"));
            assert_consistent(&found, &ta, &tb);
        }
    }

    #[test]
    fn tiny_curves() {
        for (a, b) in [(s_curve(), falling()), nine_pair()] {
            let reference = find(&a, &b);
            let ta = Curve::new(a.bez().scale(1e-60));
            let tb = Curve::new(b.bez().scale(1e-60));
            assert_same_params(&find(&ta, &tb), &reference, "1e-60");
        }
    }

    #[test]
    fn scale_invariance() {
        let mut rng = StdRng::seed_from_u64(0x5ca1e);
        let pairs = [(s_curve(), falling()), nine_pair(), loops()];
        for (a, b) in &pairs {
            let reference = find(a, b);
            for _ in 0..20 {
                let scale = 10f64.powf(rng.random_range(-60.0..60.0));
                let sa = Curve::new(a.bez().scale(scale));
                let sb = Curve::new(b.bez().scale(scale));
                assert_same_params(&find(&sa, &sb), &reference, &format!("scale {scale}"));
            }
        }
    }

    #[test]
    fn translation_invariance() {
        let mut rng = StdRng::seed_from_u64(0x7ea5);
        let pairs = [(s_curve(), falling()), nine_pair(), loops()];
        for (a, b) in &pairs {
            let reference = find(a, b);
            for _ in 0..20 {
                let origin = Point::new(rng.random_range(-1e5..1e5), rng.random_range(-1e5..1e5));
                let scale = 10f64.powf(rng.random_range(-2.0..2.0));
                let ta = Curve::new(a.bez().to_local(origin, scale));
                let tb = Curve::new(b.bez().to_local(origin, scale));
                let found = find(&ta, &tb);
                assert_same_params(&found, &reference, &format!("{origin} x {scale}"));
                assert_consistent(&found, &ta, &tb);
            }
        }
    }

    #[test]
    fn random_pairs_are_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut coord = || rng.random_range(0.0..1000.0);
        for _ in 0..100 {
            let a = Curve::from_coords(
                coord(), coord(), coord(), coord(), coord(), coord(), coord(), coord(),
            );
            let b = Curve::from_coords(
                coord(), coord(), coord(), coord(), coord(), coord(), coord(), coord(),
            );
            let found = find(&a, &b);
            assert!(found.len() <= 9);
            assert_consistent(&found, &a, &b);
            assert_eq!(find(&b, &a).len(), found.len(), "{a} and {b}");
        }
    }
}
