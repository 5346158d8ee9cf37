// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points on curves, and the crossings they form.

use core::fmt;

use crate::{Curve, Point};

/// A point on a curve, tagged with its parameter.
///
/// The curve is borrowed, never owned: a `CurvePoint` only lives as long
/// as the [`Curve`] it was evaluated on. Two `CurvePoint`s are equal when
/// they refer to the same curve (by identity) at the same parameter.
#[derive(Clone, Copy, Debug)]
pub struct CurvePoint<'a> {
    curve: &'a Curve,
    t: f64,
    point: Point,
}

impl<'a> CurvePoint<'a> {
    /// Evaluate `curve` at `t`.
    pub fn new(curve: &'a Curve, t: f64) -> Self {
        CurvePoint {
            curve,
            t,
            point: curve.eval(t),
        }
    }

    /// The curve this point lies on.
    #[inline]
    pub fn curve(&self) -> &'a Curve {
        self.curve
    }

    /// The parameter on the curve.
    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// The coordinates.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Do the two points lie within `tolerance` of each other?
    ///
    /// Only coordinates are compared, not curves or parameters.
    pub fn same_locus(&self, other: &CurvePoint<'_>, tolerance: f64) -> bool {
        self.point.is_near(other.point, tolerance)
    }

    /// Is this a point on `curve` (by identity)?
    #[inline]
    pub fn is_on(&self, curve: &Curve) -> bool {
        core::ptr::eq(self.curve, curve)
    }
}

impl PartialEq for CurvePoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.curve, other.curve) && self.t == other.t
    }
}

impl fmt::Display for CurvePoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t = ")?;
        fmt::Display::fmt(&self.t, f)?;
        write!(f, " => ")?;
        fmt::Display::fmt(&self.point, f)
    }
}

/// A crossing of two curves, or of a curve with itself.
///
/// Holds one [`CurvePoint`] on each curve. The pairing is unordered:
/// `Intersection::new(a, b) == Intersection::new(b, a)`. For a
/// self-intersection both points are on the same curve and
/// [`first`](Self::first) has the smaller parameter.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    first: CurvePoint<'a>,
    second: CurvePoint<'a>,
}

impl<'a> Intersection<'a> {
    /// Pair two points.
    pub fn new(first: CurvePoint<'a>, second: CurvePoint<'a>) -> Self {
        Intersection { first, second }
    }

    /// A crossing of `curve` with itself at parameters `t1` and `t2`.
    ///
    /// The parameters are stored in ascending order.
    pub fn self_crossing(curve: &'a Curve, t1: f64, t2: f64) -> Self {
        let (t1, t2) = if t2 < t1 { (t2, t1) } else { (t1, t2) };
        Intersection {
            first: CurvePoint::new(curve, t1),
            second: CurvePoint::new(curve, t2),
        }
    }

    /// The first point.
    #[inline]
    pub fn first(&self) -> &CurvePoint<'a> {
        &self.first
    }

    /// The second point.
    #[inline]
    pub fn second(&self) -> &CurvePoint<'a> {
        &self.second
    }

    /// Is this a crossing of a curve with itself?
    pub fn is_self_intersection(&self) -> bool {
        core::ptr::eq(self.first.curve, self.second.curve)
    }

    /// The point on `curve`, if `curve` takes part in this crossing.
    ///
    /// For a self-intersection this is the first point.
    pub fn point_on(&self, curve: &Curve) -> Option<&CurvePoint<'a>> {
        [&self.first, &self.second]
            .into_iter()
            .find(|p| p.is_on(curve))
    }

    /// The location of the crossing, halfway between the two points.
    pub fn point(&self) -> Point {
        self.first.point.midpoint(self.second.point)
    }

    /// The same crossing with the two points swapped.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Intersection {
            first: self.second,
            second: self.first,
        }
    }
}

impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl fmt::Display for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}]", self.first, self.second)
    }
}
