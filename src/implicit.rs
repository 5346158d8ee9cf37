// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The implicit equation of a cubic Bézier.
//!
//! Eliminating `t` from `x(t) - x = 0` and `y(t) - y = 0` leaves a single
//! cubic equation `f(x, y) = 0` which holds at every point of the curve,
//! extended to all real `t`. See Indrek Mandre, "Implicitization of cubic
//! Bézier curves", <http://www.mare.ee/indrek/misc/2d.pdf>.

use core::fmt;

use crate::{Cubic, Point};

/// The monomials of [`ImplicitCubic`], in coefficient order.
pub const IMPLICIT_MONOMIALS: [&str; 10] =
    ["x³", "x²y", "xy²", "y³", "x²", "xy", "y²", "x", "y", "1"];

/// A bivariate cubic `f(x, y)` whose zero set contains a cubic Bézier.
///
/// The ten coefficients multiply `x³, x²y, xy², y³, x², xy, y², x, y, 1`
/// in that order.
///
/// For a curve whose cubic terms vanish (a quadratic, a line or a point)
/// [`ImplicitCubic::from_parametric`] gives zero in every coefficient.
/// Lines and parabolas have their own closed forms,
/// [`ImplicitCubic::line`] and [`ImplicitCubic::conic`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImplicitCubic {
    coeffs: [f64; 10],
}

impl ImplicitCubic {
    /// Implicitize the curve with coordinates `x(t)` and `y(t)`.
    ///
    /// The result is a fixed sequence of products of the power-basis
    /// coefficients, so the same input always yields the same bits.
    pub fn from_parametric(x: &Cubic, y: &Cubic) -> Self {
        let [a0, a1, a2, a3] = *x.coeffs();
        let [b0, b1, b2, b3] = *y.coeffs();
        let uxxx = b3 * b3 * b3;
        let uxxy = -3.0 * a3 * b3 * b3;
        let uxyy = 3.0 * b3 * a3 * a3;
        let uyyy = -a3 * a3 * a3;
        let uxx = -3.0 * a3 * b1 * b2 * b3 + a1 * b2 * b3 * b3 - a2 * b3 * b2 * b2
            + 2.0 * a2 * b1 * b3 * b3 + 3.0 * a3 * b0 * b3 * b3 + a3 * b2 * b2 * b2
            - 3.0 * a0 * b3 * b3 * b3;
        let uxy = a1 * a3 * b2 * b3 - a2 * a3 * b1 * b3 - 6.0 * b0 * b3 * a3 * a3
            - 3.0 * a1 * a2 * b3 * b3 - 2.0 * a2 * a3 * b2 * b2 + 2.0 * b2 * b3 * a2 * a2
            + 3.0 * b1 * b2 * a3 * a3 + 6.0 * a0 * a3 * b3 * b3;
        let uyy = 3.0 * a1 * a2 * a3 * b3 + a3 * b2 * a2 * a2 - a2 * b1 * a3 * a3
            - 3.0 * a0 * b3 * a3 * a3 - 2.0 * a1 * b2 * a3 * a3 - b3 * a2 * a2 * a2
            + 3.0 * b0 * a3 * a3 * a3;
        let ux = a2 * a3 * b0 * b1 * b3 - a1 * a2 * b1 * b2 * b3 - a1 * a3 * b0 * b2 * b3
            + 6.0 * a0 * a3 * b1 * b2 * b3 + b1 * a1 * a1 * b3 * b3 + b3 * a2 * a2 * b1 * b1
            + 3.0 * b3 * a3 * a3 * b0 * b0 + a1 * a3 * b1 * b2 * b2 - a2 * a3 * b2 * b1 * b1
            - 6.0 * a0 * a3 * b0 * b3 * b3 - 4.0 * a0 * a2 * b1 * b3 * b3
            - 3.0 * b0 * b1 * b2 * a3 * a3 - 2.0 * a0 * a1 * b2 * b3 * b3
            - 2.0 * a1 * a3 * b3 * b1 * b1 - 2.0 * b0 * b2 * b3 * a2 * a2
            + 2.0 * a0 * a2 * b3 * b2 * b2 + 2.0 * a2 * a3 * b0 * b2 * b2
            + 3.0 * a1 * a2 * b0 * b3 * b3 + a3 * a3 * b1 * b1 * b1 + 3.0 * a0 * a0 * b3 * b3 * b3
            - 2.0 * a0 * a3 * b2 * b2 * b2;
        let uy = a0 * a2 * a3 * b1 * b3 + a1 * a2 * a3 * b1 * b2 - a0 * a1 * a3 * b2 * b3
            - 6.0 * a1 * a2 * a3 * b0 * b3 - a1 * a1 * a1 * b3 * b3 - 3.0 * a3 * a3 * a3 * b0 * b0
            - a1 * a3 * a3 * b1 * b1 - a3 * a1 * a1 * b2 * b2 - 3.0 * a3 * a0 * a0 * b3 * b3
            + a2 * b2 * b3 * a1 * a1 - a1 * b1 * b3 * a2 * a2 - 3.0 * a0 * b1 * b2 * a3 * a3
            - 2.0 * a0 * b2 * b3 * a2 * a2 - 2.0 * a3 * b0 * b2 * a2 * a2
            + 2.0 * a0 * a2 * a3 * b2 * b2 + 2.0 * a2 * b0 * b1 * a3 * a3
            + 2.0 * a3 * b1 * b3 * a1 * a1 + 3.0 * a0 * a1 * a2 * b3 * b3
            + 4.0 * a1 * b0 * b2 * a3 * a3 + 6.0 * a0 * b0 * b3 * a3 * a3
            + 2.0 * b0 * b3 * a2 * a2 * a2;
        let u0 = a0 * a1 * a2 * b1 * b2 * b3 + a0 * a1 * a3 * b0 * b2 * b3
            - a0 * a2 * a3 * b0 * b1 * b3 - a1 * a2 * a3 * b0 * b1 * b2
            + b0 * a1 * a1 * a1 * b3 * b3 - b3 * a2 * a2 * a2 * b0 * b0
            + a1 * b0 * a3 * a3 * b1 * b1 + a1 * b2 * a0 * a0 * b3 * b3
            + a3 * b0 * a1 * a1 * b2 * b2 + a3 * b2 * a2 * a2 * b0 * b0
            - a0 * b1 * a1 * a1 * b3 * b3 - a0 * b3 * a2 * a2 * b1 * b1
            - a2 * b1 * a3 * a3 * b0 * b0 - a2 * b3 * a0 * a0 * b2 * b2
            - 3.0 * a0 * b3 * a3 * a3 * b0 * b0 - 2.0 * a1 * b2 * a3 * a3 * b0 * b0
            + 2.0 * a2 * b1 * a0 * a0 * b3 * b3 + 3.0 * a3 * b0 * a0 * a0 * b3 * b3
            + a0 * a2 * a3 * b2 * b1 * b1 + a1 * b0 * b1 * b3 * a2 * a2
            - a0 * a1 * a3 * b1 * b2 * b2 - a2 * b0 * b2 * b3 * a1 * a1
            - 3.0 * a0 * a1 * a2 * b0 * b3 * b3 - 3.0 * a3 * b1 * b2 * b3 * a0 * a0
            - 2.0 * a0 * a2 * a3 * b0 * b2 * b2 - 2.0 * a3 * b0 * b1 * b3 * a1 * a1
            + 2.0 * a0 * a1 * a3 * b3 * b1 * b1 + 2.0 * a0 * b0 * b2 * b3 * a2 * a2
            + 3.0 * a0 * b0 * b1 * b2 * a3 * a3 + 3.0 * a1 * a2 * a3 * b3 * b0 * b0
            + a3 * a3 * a3 * b0 * b0 * b0 - a0 * a0 * a0 * b3 * b3 * b3
            + a3 * a0 * a0 * b2 * b2 * b2 - a0 * a3 * a3 * b1 * b1 * b1;
        ImplicitCubic {
            coeffs: [uxxx, uxxy, uxyy, uyyy, uxx, uxy, uyy, ux, uy, u0],
        }
    }

    /// The line through a curve whose control points are collinear.
    ///
    /// The direction is the largest of the non-constant coefficient
    /// vectors, so the form is `dy (x - x0) - dx (y - y0)`.
    pub fn line(x: &Cubic, y: &Cubic) -> Self {
        let [a0, a1, a2, a3] = *x.coeffs();
        let [b0, b1, b2, b3] = *y.coeffs();
        let (dx, dy) = [(a1, b1), (a2, b2), (a3, b3)]
            .into_iter()
            .max_by(|u, v| u.0.hypot(u.1).total_cmp(&v.0.hypot(v.1)))
            .unwrap_or((a1, b1));
        ImplicitCubic {
            coeffs: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, dy, -dx, dx * b0 - dy * a0],
        }
    }

    /// The parabola traced by a curve whose cubic terms vanish.
    ///
    /// With `P(t) - P(0) = A1 t + A2 t²` and `D = A1 × A2`, crossing with
    /// `A2` and with `A1` gives `(P - P(0)) × A2 = D t` and
    /// `A1 × (P - P(0)) = D t²`. Eliminating `t` leaves the conic
    /// `((P - P(0)) × A2)² - D (A1 × (P - P(0))) = 0`. The cubic terms are
    /// ignored.
    pub fn conic(x: &Cubic, y: &Cubic) -> Self {
        let [a0, a1, a2, _] = *x.coeffs();
        let [b0, b1, b2, _] = *y.coeffs();
        let d = a1 * b2 - b1 * a2;
        let k = b2 * a0 - a2 * b0;
        let m = a1 * b0 - b1 * a0;
        ImplicitCubic {
            coeffs: [
                0.0,
                0.0,
                0.0,
                0.0,
                b2 * b2,
                -2.0 * a2 * b2,
                a2 * a2,
                d * b1 - 2.0 * k * b2,
                2.0 * k * a2 - d * a1,
                k * k + d * m,
            ],
        }
    }

    /// Create from raw coefficients, in the order of [`IMPLICIT_MONOMIALS`].
    pub const fn new(coeffs: [f64; 10]) -> Self {
        ImplicitCubic { coeffs }
    }

    /// The coefficients, in the order of [`IMPLICIT_MONOMIALS`].
    pub fn coeffs(&self) -> &[f64; 10] {
        &self.coeffs
    }

    /// Evaluate `f` at a point.
    pub fn eval(&self, p: Point) -> f64 {
        let [xxx, xxy, xyy, yyy, xx, xy, yy, x, y, c] = self.coeffs;
        let cubic_in_x = ((xxx * p.x + xxy * p.y + xx) * p.x + xy * p.y + x) * p.x;
        let rest = ((xyy * p.x + yyy * p.y + yy) * p.y + y) * p.y;
        cubic_in_x + rest + c
    }

    /// A bound on the magnitude of every term of `self.eval(p)`.
    ///
    /// Useful to judge whether a small value of `f` is really zero.
    pub fn eval_bound(&self, p: Point) -> f64 {
        self.abs().eval(Point::new(p.x.abs(), p.y.abs()))
    }

    /// The form with the absolute value of every coefficient.
    #[must_use]
    pub fn abs(&self) -> Self {
        ImplicitCubic {
            coeffs: self.coeffs.map(f64::abs),
        }
    }

    /// Returns the largest absolute value of any coefficient.
    pub fn magnitude(&self) -> f64 {
        crate::common::max_abs(&self.coeffs)
    }

    /// Are all the coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }
}

impl fmt::Display for ImplicitCubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (c, m)) in self.coeffs.iter().zip(IMPLICIT_MONOMIALS).enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            fmt::Display::fmt(c, f)?;
            if m != "1" {
                write!(f, "{m}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CubicBez;

    fn implicit_of(c: &CubicBez) -> ImplicitCubic {
        let (x, y) = c.power_coeffs();
        ImplicitCubic::from_parametric(&x, &y)
    }

    #[test]
    fn vanishes_on_the_curve() {
        let curves = [
            CubicBez::new((0.0, 1000.0), (1500.0, -300.0), (-500.0, -300.0), (750.0, 1000.0)),
            CubicBez::new((0.0, 0.0), (1750.0, 1500.0), (-1000.0, 1000.0), (1000.0, 0.0)),
            CubicBez::new((0.0, 1000.0), (333.0, -2000.0), (666.0, 3000.0), (1000.0, 0.0)),
        ];
        for c in &curves {
            let f = implicit_of(c);
            assert!(f.is_finite());
            for i in 0..=20 {
                let p = c.eval(f64::from(i) / 20.0);
                assert!(
                    f.eval(p).abs() <= 1e-12 * f.eval_bound(p),
                    "f({p}) = {} for {c:?}",
                    f.eval(p)
                );
            }
            // The extension of the curve beyond [0, 1] is also on the zero set.
            let p = c.eval(1.5);
            assert!(f.eval(p).abs() <= 1e-12 * f.eval_bound(p));
        }
    }

    #[test]
    fn nonzero_off_the_curve() {
        let c = CubicBez::new((0.0, 1000.0), (1500.0, -300.0), (-500.0, -300.0), (750.0, 1000.0));
        let f = implicit_of(&c);
        let p = Point::new(2000.0, 2000.0);
        assert!(f.eval(p).abs() > 1e-6 * f.eval_bound(p));
    }

    #[test]
    fn leading_terms_from_cubic_coefficients() {
        // x(t) = t³, y(t) = t: the curve x = y³.
        let x = Cubic::new([0.0, 0.0, 0.0, 1.0]);
        let y = Cubic::new([0.0, 1.0, 0.0, 0.0]);
        let f = ImplicitCubic::from_parametric(&x, &y);
        let [xxx, xxy, xyy, yyy, xx, xy, yy, ..] = *f.coeffs();
        assert_eq!([xxx, xxy, xyy, yyy], [0.0, 0.0, 0.0, -1.0]);
        assert_eq!([xx, xy, yy], [0.0, 0.0, 0.0]);
        assert_eq!(f.eval(Point::new(8.0, 2.0)), 0.0);
        assert_eq!(f.eval(Point::new(8.0, 0.0)), f.coeffs()[7] * 8.0);
    }

    #[test]
    fn quadratic_terms_give_zero_form() {
        // Degree-elevated line with evenly spaced control points.
        let c = CubicBez::new(
            (0.0, 100.0),
            (100.0 / 3.0, 200.0 / 3.0),
            (200.0 / 3.0, 100.0 / 3.0),
            (100.0, 0.0),
        );
        let f = implicit_of(&c);
        assert!(f.magnitude() <= 1e-6, "{f}");
    }

    #[test]
    fn line_form() {
        // Unevenly spaced collinear control points.
        let c = CubicBez::new((0.0, 100.0), (10.0, 90.0), (20.0, 80.0), (100.0, 0.0));
        let (x, y) = c.power_coeffs();
        let f = ImplicitCubic::line(&x, &y);
        for i in 0..=10 {
            let p = c.eval(f64::from(i) / 10.0);
            assert!(f.eval(p).abs() <= 1e-12 * f.eval_bound(p), "f({p}) = {}", f.eval(p));
        }
        assert!(f.eval(Point::new(0.0, 0.0)).abs() > 1.0);
    }

    #[test]
    fn conic_form() {
        // Degree-elevated quadratic (0, 0), (50, 100), (100, 0).
        let c = CubicBez::new(
            (0.0, 0.0),
            (100.0 / 3.0, 200.0 / 3.0),
            (200.0 / 3.0, 200.0 / 3.0),
            (100.0, 0.0),
        );
        let (x, y) = c.power_coeffs();
        let f = ImplicitCubic::conic(&x, &y);
        assert_eq!(f.coeffs()[..4], [0.0; 4]);
        for i in 0..=10 {
            let p = c.eval(f64::from(i) / 10.0);
            assert!(f.eval(p).abs() <= 1e-12 * f.eval_bound(p), "f({p}) = {}", f.eval(p));
        }
        // The parabola continues beyond the segment.
        let p = c.eval(-0.5);
        assert!(f.eval(p).abs() <= 1e-12 * f.eval_bound(p));
        let off = Point::new(50.0, 60.0);
        assert!(f.eval(off).abs() > 1e-6 * f.eval_bound(off));
    }

    #[test]
    fn display() {
        let f = ImplicitCubic::new([1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 5.0]);
        assert_eq!(
            f.to_string(),
            "1x³ + 0x²y + 0xy² + -1y³ + 0x² + 0xy + 0y² + 2x + 0y + 5"
        );
    }
}
