// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form self-intersection of a cubic Bézier.
//!
//! A cubic crosses itself when `B(t1) = B(t2)` for `t1 != t2`. Dividing the
//! coordinate differences by `t1 - t2` leaves two quadratic equations in
//! the symmetric functions of `t1` and `t2`, and eliminating one of them
//! gives the single quadratic `u2 t² + u1 t + u0 = 0` whose two roots are
//! the parameters of the crossing.

use crate::common::{is_negligible, solve_quadratic};
use crate::{Curve, IntersectError, IntersectOptions, Intersection};

/// The self-intersection of `curve`, if it has one in `[0, 1]`.
///
/// A curve has at most one. Degenerate curves (lines, quadratics, points)
/// and cusps, where both parameters coincide, have none.
///
/// Only the parametric form is used, with its coefficients divided by the
/// size of the control bounds, so any curve whose control points and
/// bounds are finite can be solved.
///
/// # Errors
///
/// Returns [`IntersectError::NumericOverflow`] if the control points, the
/// parametric coefficients or the size of the curve are not finite.
pub fn self_intersection<'a>(
    curve: &'a Curve,
    options: &IntersectOptions,
) -> Result<Option<Intersection<'a>>, IntersectError> {
    let overflow = IntersectError::NumericOverflow {
        stage: "self-intersection",
    };
    let (x, y) = curve.parametric();
    let extent = curve.control_bounds().max_extent();
    if !curve.bez().is_finite() || !x.is_finite() || !y.is_finite() || !extent.is_finite() {
        return Err(overflow);
    }
    if extent == 0.0 {
        return Ok(None);
    }
    let unit = extent.recip();
    let [_, a1, a2, a3] = (*x.coeffs()).map(|c| c * unit);
    let [_, b1, b2, b3] = (*y.coeffs()).map(|c| c * unit);

    let d = a2 * b3 - a3 * b2;
    let e = a1 * b3 - a3 * b1;
    let u2 = d * d;
    let u1 = d * e;
    let u0 = -a1 * a2 * b2 * b3 - a2 * a3 * b1 * b2 - 2.0 * a1 * a3 * b1 * b3
        + a1 * a1 * b3 * b3
        + a3 * a3 * b1 * b1
        + a1 * a3 * b2 * b2
        + b1 * b3 * a2 * a2;
    if !(u2.is_finite() && u1.is_finite() && u0.is_finite()) {
        return Err(overflow);
    }

    let scale = (a2 * b3).abs() + (a3 * b2).abs();
    if is_negligible(u2, scale * scale, options.coefficient_epsilon) {
        return Ok(None);
    }
    let roots = solve_quadratic(u0, u1, u2);
    let [t1, t2] = match roots.as_slice() {
        [t1, t2] => [*t1, *t2],
        // A double root is a cusp.
        _ => return Ok(None),
    };
    if !(0.0..=1.0).contains(&t1) || !(0.0..=1.0).contains(&t2) {
        return Ok(None);
    }
    if t2 - t1 <= options.root_accuracy {
        log::debug!("cusp at t = {t1} on {curve}");
        return Ok(None);
    }
    let tolerance = curve.control_bounds().max_extent() / options.tolerance_factor;
    let crossing = Intersection::self_crossing(curve, t1, t2);
    if !crossing.first().same_locus(crossing.second(), tolerance) {
        log::debug!(
            "self-intersection candidates {} and {} do not meet on {curve}",
            crossing.first(),
            crossing.second()
        );
        return Ok(None);
    }
    Ok(Some(crossing))
}
