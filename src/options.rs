// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for intersection queries.

use core::time::Duration;

/// Accuracy and budget settings shared by all intersection queries.
///
/// All tolerances are relative, so the defaults work the same for curves
/// measured in millimetres or in kilometres.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectOptions {
    /// Width in parameter space below which a root interval is accepted.
    pub root_accuracy: f64,
    /// Relative threshold below which a polynomial coefficient is treated
    /// as zero.
    pub coefficient_epsilon: f64,
    /// Candidate points match when they are no further apart than the
    /// largest control-bounds extent divided by this factor.
    pub tolerance_factor: f64,
    /// Wall-clock budget per pair of curves. `None` means unlimited.
    pub time_budget: Option<Duration>,
}

impl IntersectOptions {
    /// Default root accuracy.
    pub const DEFAULT_ROOT_ACCURACY: f64 = 1e-11;
    /// Default coefficient threshold.
    pub const DEFAULT_COEFFICIENT_EPSILON: f64 = 1e-10;
    /// Default matching tolerance factor.
    pub const DEFAULT_TOLERANCE_FACTOR: f64 = 1e6;

    /// The default options.
    pub const fn new() -> Self {
        IntersectOptions {
            root_accuracy: Self::DEFAULT_ROOT_ACCURACY,
            coefficient_epsilon: Self::DEFAULT_COEFFICIENT_EPSILON,
            tolerance_factor: Self::DEFAULT_TOLERANCE_FACTOR,
            time_budget: None,
        }
    }

    /// Set the root accuracy.
    #[must_use]
    pub const fn with_root_accuracy(mut self, root_accuracy: f64) -> Self {
        self.root_accuracy = root_accuracy;
        self
    }

    /// Set the coefficient threshold.
    #[must_use]
    pub const fn with_coefficient_epsilon(mut self, coefficient_epsilon: f64) -> Self {
        self.coefficient_epsilon = coefficient_epsilon;
        self
    }

    /// Set the matching tolerance factor.
    #[must_use]
    pub const fn with_tolerance_factor(mut self, tolerance_factor: f64) -> Self {
        self.tolerance_factor = tolerance_factor;
        self
    }

    /// Limit the time spent on each pair.
    #[must_use]
    pub const fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self::new()
    }
}
