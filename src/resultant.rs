// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eliminating one curve's parameter against the other's implicit form.

use crate::{Cubic, Curve, ImplicitCubic, Nonic, PolyDyn};

/// The univariate polynomial `p(t) = f_A(x_B(t), y_B(t))`.
///
/// Here `f_A` is the implicit equation of curve A and `(x_B, y_B)` are the
/// coordinates of curve B. Wherever B meets the (unbounded) curve A,
/// `p` has a root, so the real roots of `p` in `[0, 1]` are the parameters
/// on B of candidate intersections.
///
/// Alongside `p` we keep a magnitude bound: the same substitution applied
/// to the absolute values of every coefficient. It scales exactly like `p`
/// under a uniform scaling of both curves, so comparing against it makes
/// the "is this coefficient zero" decision scale-invariant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resultant {
    poly: Nonic,
    bound: Nonic,
}

impl Resultant {
    /// Substitute the coordinates `x(t)`, `y(t)` into `implicit`.
    pub fn new(implicit: &ImplicitCubic, x: &Cubic, y: &Cubic) -> Self {
        let poly = substitute(implicit, *x, *y);
        let bound = substitute(&implicit.abs(), x.abs(), y.abs());
        log::trace!("resultant coefficients {:?}", poly.coeffs());
        Resultant { poly, bound }
    }

    /// The resultant of `a`'s implicit form and `b`'s coordinates.
    ///
    /// Its roots are parameters on `b`.
    pub fn of_curves(a: &Curve, b: &Curve) -> Self {
        let (x, y) = b.parametric();
        Self::new(a.implicit(), x, y)
    }

    /// The polynomial, constant term first.
    pub fn poly(&self) -> &Nonic {
        &self.poly
    }

    /// The magnitude bound, constant term first.
    pub fn bound(&self) -> &Nonic {
        &self.bound
    }

    /// Are all coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.poly.is_finite() && self.bound.is_finite()
    }

    /// The effective degree.
    ///
    /// Coefficients with `|c| <= epsilon * B`, where `B` is the largest
    /// coefficient of the magnitude bound, are treated as zero. Returns
    /// `None` if that leaves nothing, meaning the curves coincide.
    pub fn degree(&self, epsilon: f64) -> Option<usize> {
        let scale = self.bound.magnitude();
        self.poly
            .coeffs()
            .iter()
            .rposition(|c| !crate::common::is_negligible(*c, scale, epsilon))
    }

    /// The polynomial truncated to `degree`, for root isolation.
    pub fn to_poly_dyn(&self, degree: usize) -> PolyDyn {
        let mut p = PolyDyn::from(self.poly);
        p.truncate(degree);
        p
    }
}

/// Expand `f(x(t), y(t))` term by term.
fn substitute(f: &ImplicitCubic, x: Cubic, y: Cubic) -> Nonic {
    let [uxxx, uxxy, uxyy, uyyy, uxx, uxy, uyy, ux, uy, u0] = *f.coeffs();
    let xx = x * x;
    let xy = x * y;
    let yy = y * y;
    let cubic = xx * x * uxxx + xx * y * uxxy + xy * y * uxyy + yy * y * uyyy;
    let quadratic = xx * uxx + xy * uxy + yy * uyy;
    let linear = x * ux + y * uy;
    let mut p = cubic + quadratic.resize::<10>() + linear.resize::<10>();
    p.coeffs[0] += u0;
    p
}
