// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairing up candidate points found from each side of a curve pair.

use smallvec::SmallVec;

use crate::{Curve, CurvePoint, Intersection};

/// Intersections of a single pair of curves; Bézout allows at most 9.
pub type PairIntersections<'a> = SmallVec<[Intersection<'a>; 9]>;

/// The distance within which candidates from both sides are the same point.
///
/// This is the largest width or height of either curve's control bounds,
/// divided by `factor`. Scaling both curves scales the tolerance with them.
pub fn match_tolerance(a: &Curve, b: &Curve, factor: f64) -> f64 {
    let (ra, rb) = (a.control_bounds(), b.control_bounds());
    ra.max_extent().max(rb.max_extent()) / factor
}

/// Pair every candidate on B with the nearest candidate on A.
///
/// A pair is accepted when the points are at most `tolerance` apart. Any
/// candidate on B without such a partner is spurious and dropped.
pub fn match_candidates<'a>(
    on_a: &[CurvePoint<'a>],
    on_b: &[CurvePoint<'a>],
    tolerance: f64,
) -> PairIntersections<'a> {
    let mut result = PairIntersections::new();
    for b in on_b {
        let nearest = on_a
            .iter()
            .map(|a| (a, a.point().distance(b.point())))
            .min_by(|x, y| x.1.total_cmp(&y.1));
        match nearest {
            Some((a, d)) if d <= tolerance => result.push(Intersection::new(*a, *b)),
            Some((a, d)) => {
                log::debug!(
                    "spurious candidate {b}: nearest {a} is {d} away, tolerance {tolerance}"
                );
            }
            None => log::debug!("spurious candidate {b}: no candidates on the other curve"),
        }
    }
    result
}
