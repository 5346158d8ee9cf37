// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real-root isolation with Sturm sequences.
//!
//! The chain starts `p0 = p`, `p1 = p'` and continues with the negated
//! remainders `p(i+1) = -rem(p(i-1), p(i))`. The number of distinct real
//! roots of `p` in `(a, b]` is the difference between the number of sign
//! changes along the chain at `a` and at `b`. Counting sign agreements
//! instead gives the same difference up to sign, which is what we do.
//!
//! Consecutive members usually differ in degree by one, so the quotient has
//! just two terms. When a remainder loses more than one degree the next
//! division needs a longer quotient, and the chain carries on with it.

use smallvec::SmallVec;

use crate::common::max_abs;
use crate::{Deadline, IntersectError, PolyDyn};

/// Roots of a polynomial of degree at most 9 are stored inline.
pub type Roots = SmallVec<[f64; 9]>;

/// A Sturm sequence of a univariate polynomial.
#[derive(Clone, Debug)]
pub struct SturmSequence {
    chain: SmallVec<[PolyDyn; 10]>,
}

impl SturmSequence {
    /// Build the chain for `p`.
    ///
    /// `p` should already be trimmed to its true degree. Every member is
    /// scaled so that its largest coefficient has magnitude one, which
    /// keeps signs intact. A remainder coefficient is dropped when
    /// `|c| <= epsilon * (|A| + |q| * |B|)`, for dividend `A`, quotient `q`
    /// and divisor `B`, where `|q|` sums the quotient's coefficients and
    /// the others are the largest coefficient magnitudes.
    ///
    /// # Errors
    ///
    /// Returns [`IntersectError::NumericOverflow`] if any member has a
    /// non-finite coefficient.
    pub fn new(p: PolyDyn, epsilon: f64) -> Result<Self, IntersectError> {
        const STAGE: &str = "sturm sequence";
        if !p.is_finite() {
            return Err(IntersectError::NumericOverflow { stage: STAGE });
        }
        let mut p0 = p;
        p0.normalize();
        let mut chain: SmallVec<[PolyDyn; 10]> = SmallVec::new();
        if p0.degree() == 0 {
            chain.push(p0);
            return Ok(SturmSequence { chain });
        }
        let mut p1 = p0.deriv();
        p1.normalize();
        chain.push(p0);
        chain.push(p1);

        loop {
            let (a, b) = match &chain[..] {
                [.., a, b] => (a, b),
                _ => break,
            };
            if b.degree() == 0 {
                break;
            }
            let (mut r, reference) = negated_remainder(a, b);
            if !r.is_finite() {
                return Err(IntersectError::NumericOverflow { stage: STAGE });
            }
            if !r.trim(reference, epsilon) {
                // b divides a, so b is the last member.
                break;
            }
            r.normalize();
            chain.push(r);
        }
        log::trace!(
            "sturm chain of {} members, degrees {:?}",
            chain.len(),
            chain.iter().map(PolyDyn::degree).collect::<SmallVec<[usize; 10]>>()
        );
        Ok(SturmSequence { chain })
    }

    /// The members of the chain, starting with the (scaled) polynomial.
    pub fn members(&self) -> &[PolyDyn] {
        &self.chain
    }

    /// The degree of the polynomial the chain was built from.
    pub fn degree(&self) -> usize {
        self.chain.first().map_or(0, PolyDyn::degree)
    }

    /// Number of consecutive members whose values at `t` have the same sign.
    ///
    /// A value counts as positive when it is `>= 0`, at every point, so that
    /// both ends of an interval are judged the same way.
    pub fn sign_agreements(&self, t: f64) -> usize {
        let mut count = 0;
        let mut prev: Option<bool> = None;
        for member in &self.chain {
            let positive = member.eval(t) >= 0.0;
            if prev == Some(positive) {
                count += 1;
            }
            prev = Some(positive);
        }
        count
    }

    /// The number of distinct real roots in `(lo, hi]`.
    pub fn count_roots(&self, lo: f64, hi: f64) -> usize {
        self.sign_agreements(lo).abs_diff(self.sign_agreements(hi))
    }

    /// Isolate the real roots in `(lo, hi]` by bisection.
    ///
    /// Intervals containing no root are discarded, intervals narrower than
    /// `accuracy` are resolved to their midpoint. The roots come back sorted,
    /// with any closer together than `accuracy` merged. If rounding produces
    /// more roots than the degree allows, only the ones where the polynomial
    /// is smallest are kept.
    ///
    /// # Errors
    ///
    /// Returns [`IntersectError::BudgetExceeded`] if `deadline` passes first.
    pub fn isolate_roots(
        &self,
        lo: f64,
        hi: f64,
        accuracy: f64,
        deadline: &Deadline,
    ) -> Result<Roots, IntersectError> {
        let mut roots = Roots::new();
        let mut stack: SmallVec<[(f64, f64, usize, usize); 32]> = SmallVec::new();
        stack.push((lo, hi, self.sign_agreements(lo), self.sign_agreements(hi)));
        while let Some((s, e, vs, ve)) = stack.pop() {
            deadline.check()?;
            if vs == ve {
                continue;
            }
            let mid = 0.5 * (s + e);
            // The second test stops once the interval can no longer be split.
            if e - s < accuracy || mid <= s || mid >= e {
                roots.push(mid);
                continue;
            }
            let vm = self.sign_agreements(mid);
            stack.push((s, mid, vs, vm));
            stack.push((mid, e, vm, ve));
        }
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|b, a| *b - *a < accuracy);
        let degree = self.degree();
        if roots.len() > degree {
            log::debug!(
                "{} roots isolated for degree {degree}, keeping the smallest residuals",
                roots.len()
            );
            if let Some(p) = self.chain.first() {
                keep_smallest(&mut roots, degree, |t| p.eval(t).abs());
            }
        }
        Ok(roots)
    }
}

/// `-(a mod b)` for `deg a > deg b > 0`, with the scale it should be
/// judged against.
///
/// For `deg a = deg b + 1` this is the two-term quotient
/// `q1 = a[n+1] / b[n]`, `q0 = (a[n] - q1 b[n-1]) / b[n]`.
fn negated_remainder(a: &PolyDyn, b: &PolyDyn) -> (PolyDyn, f64) {
    let (a, b) = (a.coeffs(), b.coeffs());
    let n = b.len() - 1;
    let bn = b[n];
    let mut r: SmallVec<[f64; 10]> = a.iter().copied().collect();
    let mut q_sum = 0.0;
    for k in (0..a.len().saturating_sub(n)).rev() {
        let q = r[k + n] / bn;
        q_sum += q.abs();
        for (rj, bj) in r[k..=k + n].iter_mut().zip(b) {
            *rj -= q * bj;
        }
    }
    let reference = max_abs(a) + q_sum * max_abs(b);
    (PolyDyn::new(r[..n].iter().map(|c| -c)), reference)
}

/// Keep the `n` roots with the smallest `residual`, in ascending order.
fn keep_smallest(roots: &mut Roots, n: usize, residual: impl Fn(f64) -> f64) {
    roots.sort_by(|a, b| residual(*a).total_cmp(&residual(*b)));
    roots.truncate(n);
    roots.sort_by(f64::total_cmp);
}
