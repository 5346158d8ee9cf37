// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use arrayvec::ArrayVec;

/// Find real roots of cubic equation.
///
/// Handles the case where `c3` is zero (in that case, solving the
/// quadratic equation).
///
/// See: <https://momentsingraphics.de/CubicRoots.html>
///
/// That implementation is in turn based on Jim Blinn's "How to Solve a Cubic
/// Equation".
///
/// Return values of x for which c0 + c1 x + c2 x² + c3 x³ = 0. The roots
/// are not sorted.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let c3_recip = c3.recip();
    const ONETHIRD: f64 = 1. / 3.;
    let scaled_c2 = c2 * (ONETHIRD * c3_recip);
    let scaled_c1 = c1 * (ONETHIRD * c3_recip);
    let scaled_c0 = c0 * c3_recip;
    if !(scaled_c0.is_finite() && scaled_c1.is_finite() && scaled_c2.is_finite()) {
        // cubic coefficient is zero or nearly so.
        result.extend(solve_quadratic(c0, c1, c2));
        return result;
    }
    let (c0, c1, c2) = (scaled_c0, scaled_c1, scaled_c2);
    // (d0, d1, d2) is called "Delta" in article
    let d0 = (-c2).mul_add(c2, c1);
    let d1 = (-c1).mul_add(c2, c0);
    let d2 = c2 * c0 - c1 * c1;
    // d is called "Discriminant"
    let d = 4.0 * d0 * d2 - d1 * d1;
    // de is called "Depressed.x", Depressed.y = d0
    let de = (-2.0 * c2).mul_add(d0, d1);
    if d < 0.0 {
        let sq = (-0.25 * d).sqrt();
        let r = -0.5 * de;
        let t1 = (r + sq).cbrt() + (r - sq).cbrt();
        result.push(t1 - c2);
    } else if d == 0.0 {
        let t1 = (-d0).sqrt().copysign(de);
        result.push(t1 - c2);
        result.push(-2.0 * t1 - c2);
    } else {
        let th = d.sqrt().atan2(-de) * ONETHIRD;
        let (th_sin, th_cos) = th.sin_cos();
        let r0 = th_cos;
        let ss3 = th_sin * 3.0f64.sqrt();
        let r1 = 0.5 * (-th_cos + ss3);
        let r2 = 0.5 * (-th_cos - ss3);
        let t = 2.0 * (-d0).sqrt();
        result.push(t.mul_add(r0, -c2));
        result.push(t.mul_add(r1, -c2));
        result.push(t.mul_add(r2, -c2));
    }
    result
}

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0, in ascending order.
///
/// If the equation is nearly linear, the root ignoring the quadratic term
/// is returned; the other root might be out of representable range. When
/// all coefficients are zero, so that all values of x satisfy the
/// equation, a single `0.0` is returned.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // sc1 * sc1 overflowed. Find one root using sc1 x + x² = 0,
        // the other as sc0 / root1.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// The largest absolute value in `values`, or zero when empty.
///
/// NaN entries are ignored.
#[inline]
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, c| acc.max(c.abs()))
}

/// Is `value` negligible next to `scale`?
///
/// The comparison is relative, `|value| <= epsilon * scale`, so that
/// decisions made with it do not change when every quantity involved is
/// multiplied by the same factor. A zero `value` is always negligible.
#[inline]
pub fn is_negligible(value: f64, scale: f64, epsilon: f64) -> bool {
    value.abs() <= epsilon * scale
}

/// Clamp parameters that fall just outside the unit interval.
///
/// Values within `slack` of `[0, 1]` are pulled onto it, anything further
/// out (or NaN) yields `None`.
#[inline]
pub fn clamp_unit(t: f64, slack: f64) -> Option<f64> {
    if (-slack..=1.0 + slack).contains(&t) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}
