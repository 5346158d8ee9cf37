// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wall-clock budgets for long-running root isolation.

use std::time::{Duration, Instant};

use crate::IntersectError;

/// A point in time after which work should stop.
///
/// The unlimited deadline never expires and never reads the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never expires.
    pub const NEVER: Self = Deadline(None);

    /// A deadline `budget` from now, or never if `budget` is `None`.
    pub fn after(budget: Option<Duration>) -> Self {
        // A budget too large to represent is the same as none.
        Deadline(budget.and_then(|b| Instant::now().checked_add(b)))
    }

    /// Has the deadline passed?
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|end| Instant::now() >= end)
    }

    /// `Err(BudgetExceeded)` once the deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`IntersectError::BudgetExceeded`] if the deadline has passed.
    pub fn check(&self) -> Result<(), IntersectError> {
        if self.expired() {
            Err(IntersectError::BudgetExceeded)
        } else {
            Ok(())
        }
    }
}
