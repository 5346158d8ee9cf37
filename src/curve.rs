// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curves prepared for intersection queries.

use core::fmt;

use crate::common::{clamp_unit, is_negligible, solve_cubic};
use crate::{Cubic, CubicBez, ImplicitCubic, Point, Rect};

/// Relative threshold used to classify degenerate control polygons.
pub const DEGENERACY_EPSILON: f64 = 1e-10;

// Parameters this far outside [0, 1] are still attributed to the segment.
const LOCATE_SLACK: f64 = 1e-9;

/// How far a cubic Bézier falls short of being a proper cubic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Degeneracy {
    /// A proper cubic.
    None,
    /// All control points coincide.
    Point,
    /// The control points are collinear, so the curve traces a line.
    Line,
    /// The cubic terms vanish, so the curve is a parabola.
    Quadratic,
}

impl Degeneracy {
    /// Is this anything other than [`Degeneracy::None`]?
    pub fn is_degenerate(self) -> bool {
        self != Self::None
    }

    fn classify(x: &Cubic, y: &Cubic, epsilon: f64) -> Self {
        let [a0, a1, a2, a3] = *x.coeffs();
        let [b0, b1, b2, b3] = *y.coeffs();
        let m = crate::common::max_abs(&[a1, a2, a3, b1, b2, b3]);
        if m == 0.0 || is_negligible(m, a0.abs().max(b0.abs()), epsilon) {
            return Self::Point;
        }
        let m2 = m * m;
        let collinear = [a1 * b2 - a2 * b1, a1 * b3 - a3 * b1, a2 * b3 - a3 * b2]
            .iter()
            .all(|c| is_negligible(*c, m2, epsilon));
        if collinear {
            Self::Line
        } else if is_negligible(a3.abs().max(b3.abs()), m, epsilon) {
            Self::Quadratic
        } else {
            Self::None
        }
    }
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "a proper cubic",
            Self::Point => "a point",
            Self::Line => "a line",
            Self::Quadratic => "a quadratic",
        };
        f.write_str(name)
    }
}

/// A cubic Bézier together with everything intersection queries need.
///
/// The power-basis coordinates, the implicit equation, the control bounds
/// and the degeneracy class are derived once at construction. A `Curve` is
/// immutable afterwards, so it can be shared freely between threads and
/// borrowed by any number of [`CurvePoint`](crate::CurvePoint)s.
#[derive(Clone, Debug)]
pub struct Curve {
    bez: CubicBez,
    x: Cubic,
    y: Cubic,
    implicit: ImplicitCubic,
    bounds: Rect,
    degeneracy: Degeneracy,
}

impl Curve {
    /// Prepare a cubic Bézier.
    pub fn new(bez: CubicBez) -> Self {
        let (x, y) = bez.power_coeffs();
        let degeneracy = Degeneracy::classify(&x, &y, DEGENERACY_EPSILON);
        let implicit = match degeneracy {
            Degeneracy::Line => ImplicitCubic::line(&x, &y),
            Degeneracy::Quadratic => ImplicitCubic::conic(&x, &y),
            Degeneracy::None | Degeneracy::Point => ImplicitCubic::from_parametric(&x, &y),
        };
        Curve {
            bez,
            x,
            y,
            implicit,
            bounds: bez.control_bounds(),
            degeneracy,
        }
    }

    /// Prepare a curve from start point, two control points and end point.
    #[allow(clippy::too_many_arguments, reason = "eight coordinates of four points")]
    pub fn from_coords(
        x1: f64,
        y1: f64,
        cx1: f64,
        cy1: f64,
        cx2: f64,
        cy2: f64,
        x2: f64,
        y2: f64,
    ) -> Self {
        Self::new(CubicBez::new((x1, y1), (cx1, cy1), (cx2, cy2), (x2, y2)))
    }

    /// The control points.
    #[inline]
    pub fn bez(&self) -> &CubicBez {
        &self.bez
    }

    /// The point at parameter `t`.
    ///
    /// Any real `t` is accepted; values outside `[0, 1]` extrapolate the
    /// segment. NaN and infinities propagate.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        Point::new(self.x.eval(t), self.y.eval(t))
    }

    /// The coordinate functions `x(t)` and `y(t)`.
    #[inline]
    pub fn parametric(&self) -> (&Cubic, &Cubic) {
        (&self.x, &self.y)
    }

    /// The implicit equation of the curve.
    ///
    /// For a line or a parabola this is the equation of that line or
    /// parabola. For a point it is identically zero.
    #[inline]
    pub fn implicit(&self) -> &ImplicitCubic {
        &self.implicit
    }

    /// The bounding box of the control points.
    #[inline]
    pub fn control_bounds(&self) -> Rect {
        self.bounds
    }

    /// The degeneracy class of the control polygon.
    #[inline]
    pub fn degeneracy(&self) -> Degeneracy {
        self.degeneracy
    }

    /// Are the control points and the implicit coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.bez.is_finite() && self.implicit.is_finite()
    }

    /// Find the parameter of a point known to lie on the curve.
    ///
    /// Solves `x(s) = p.x` and `y(s) = p.y` in closed form and returns the
    /// root in `[0, 1]` whose point is nearest to `p`, provided it is within
    /// `tolerance`.
    pub fn locate(&self, p: Point, tolerance: f64) -> Option<f64> {
        let scale = self.x.magnitude().max(self.y.magnitude());
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        let candidates = solve_coord(&self.x, p.x, scale)
            .into_iter()
            .chain(solve_coord(&self.y, p.y, scale))
            .chain([0.0, 1.0]);
        for s in candidates.filter_map(|s| clamp_unit(s, LOCATE_SLACK)) {
            let d = self.eval(s).distance(p);
            if d < best_dist {
                best = Some(s);
                best_dist = d;
            }
        }
        best.filter(|_| best_dist <= tolerance)
    }
}

/// Real roots of `c(s) = target`, ignoring negligible leading terms.
fn solve_coord(c: &Cubic, target: f64, scale: f64) -> arrayvec::ArrayVec<f64, 3> {
    let [c0, c1, c2, c3] = *c.coeffs();
    let trim = |v: f64| {
        if is_negligible(v, scale, DEGENERACY_EPSILON) {
            0.0
        } else {
            v
        }
    };
    solve_cubic(c0 - target, c1, trim(c2), trim(c3))
}

impl From<CubicBez> for Curve {
    fn from(bez: CubicBez) -> Self {
        Self::new(bez)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CubicBez { p0, p1, p2, p3 } = self.bez;
        write!(f, "{p0}--{p1}--{p2}--{p3}")
    }
}
