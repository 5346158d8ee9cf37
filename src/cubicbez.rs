// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use crate::{Cubic, Point, Rect};

/// A single cubic Bézier segment, given by its four control points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, reason = "control points are self-explanatory")]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> Self {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Evaluate the curve at parameter `t`, in the Bernstein basis.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = mt * mt * 3.0 * t;
        let b2 = mt * 3.0 * t * t;
        let b3 = t * t * t;
        Point::new(
            self.p0.x * b0 + self.p1.x * b1 + self.p2.x * b2 + self.p3.x * b3,
            self.p0.y * b0 + self.p1.y * b1 + self.p2.y * b2 + self.p3.y * b3,
        )
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> Point {
        self.p0
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> Point {
        self.p3
    }

    /// The control points, in order.
    #[inline]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// The coordinate functions `x(t)` and `y(t)` in the power basis.
    ///
    /// Each is a cubic `a3 t³ + a2 t² + a1 t + a0` with
    /// `a3 = -P0 + 3P1 - 3P2 + P3`, `a2 = 3P0 - 6P1 + 3P2`,
    /// `a1 = -3P0 + 3P1` and `a0 = P0`.
    pub fn power_coeffs(&self) -> (Cubic, Cubic) {
        fn one_coord(p0: f64, p1: f64, p2: f64, p3: f64) -> Cubic {
            Cubic::new([
                p0,
                3.0 * (p1 - p0),
                3.0 * (p0 - 2.0 * p1 + p2),
                p3 - p0 + 3.0 * (p1 - p2),
            ])
        }
        (
            one_coord(self.p0.x, self.p1.x, self.p2.x, self.p3.x),
            one_coord(self.p0.y, self.p1.y, self.p2.y, self.p3.y),
        )
    }

    /// The bounding box of the control points.
    ///
    /// This always contains the curve, but is usually larger than its
    /// tight bounding box.
    pub fn control_bounds(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
            .union_pt(self.p2)
            .union_pt(self.p3)
    }

    /// Scale all control points about the origin.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        CubicBez {
            p0: self.p0.scale(factor),
            p1: self.p1.scale(factor),
            p2: self.p2.scale(factor),
            p3: self.p3.scale(factor),
        }
    }

    /// Map every control point `p` to `(p - origin) * factor`.
    ///
    /// The map is affine, so the point at `t` on the result is the image of
    /// the point at `t` on `self`.
    #[must_use]
    pub fn to_local(&self, origin: Point, factor: f64) -> Self {
        let map = |p: Point| Point::new((p.x - origin.x) * factor, (p.y - origin.y) * factor);
        CubicBez {
            p0: map(self.p0),
            p1: map(self.p1),
            p2: map(self.p2),
            p3: map(self.p3),
        }
    }

    /// Reverse the direction of the curve, mapping `t` to `1 - t`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.is_finite())
    }

    /// Is this curve NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.points().iter().any(|p| p.is_nan())
    }
}
