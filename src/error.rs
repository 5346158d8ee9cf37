// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for intersection queries.

use thiserror::Error;

use crate::Degeneracy;

/// Reasons a pair of curves could not be resolved.
///
/// None of these mean "no intersection". A pair that fails is
/// unresolved, and callers that aggregate many pairs record the failure
/// and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntersectError {
    /// A curve reduces to something of lower degree and no closed-form
    /// path applies to the pair. Lines and parabolas have their own
    /// implicit forms, so this only comes up for a curve that is a point.
    #[error("degenerate curve: control polygon is {0}")]
    DegenerateCurve(Degeneracy),

    /// The resultant vanished identically, so the curves share a
    /// continuum of points.
    #[error("curves are coincident")]
    CoincidentCurves,

    /// An intermediate value was infinite or NaN.
    #[error("non-finite value while computing {stage}")]
    NumericOverflow {
        /// The computation that overflowed.
        stage: &'static str,
    },

    /// The time budget ran out before the roots were isolated.
    #[error("time budget exceeded")]
    BudgetExceeded,
}
