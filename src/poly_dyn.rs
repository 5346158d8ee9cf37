// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomials of dynamic (run-time) degree.

use smallvec::SmallVec;

use crate::Poly;

/// A polynomial of dynamic degree.
///
/// Members of a Sturm chain lose one degree per step, which is awkward to
/// express with const generics, so they use this type. Up to degree 9 the
/// coefficients are stored inline.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyDyn {
    /// Coefficients in increasing order of degree.
    ///
    /// For example, `coeffs[0]` is the constant term.
    coeffs: SmallVec<[f64; 10]>,
}

impl PolyDyn {
    /// Constructs a new polynomial from coefficients.
    ///
    /// The first coefficient provided will be the constant term, the second will
    /// be the linear term, and so on.
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Self {
        PolyDyn {
            coeffs: coeffs.into_iter().collect(),
        }
    }

    /// The coefficients of this polynomial.
    ///
    /// In the returned slice, the coefficient of `x^i` is at index `i`.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Are all the coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// Returns the largest absolute value of any coefficient.
    pub fn magnitude(&self) -> f64 {
        crate::common::max_abs(&self.coeffs)
    }

    /// Returns the polynomial that's the derivative of this polynomial.
    pub fn deriv(&self) -> Self {
        // The zero polynomial (no coefficients) maps to itself.
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * (i as f64))
            .collect();
        PolyDyn { coeffs }
    }

    /// Evaluates this polynomial at a point, by Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        let mut acc = 0.0;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// The degree of this polynomial.
    ///
    /// This function only looks at the *presence* of coefficients, not their
    /// value. Use [`PolyDyn::truncate`] first to drop negligible leading
    /// coefficients.
    ///
    /// A polynomial with no coefficients will give zero as its degree, as will
    /// a polynomial with one coefficient.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// The leading coefficient, or zero for the empty polynomial.
    pub fn leading(&self) -> f64 {
        self.coeffs.last().copied().unwrap_or(0.0)
    }

    /// Drops every coefficient above `degree`.
    pub fn truncate(&mut self, degree: usize) {
        self.coeffs.truncate(degree + 1);
    }

    /// Drops leading coefficients with `|c| <= epsilon * scale`.
    ///
    /// Returns `true` if anything is left. When every coefficient is
    /// negligible the polynomial becomes the empty (zero) polynomial.
    pub fn trim(&mut self, scale: f64, epsilon: f64) -> bool {
        while let Some(&c) = self.coeffs.last() {
            if crate::common::is_negligible(c, scale, epsilon) {
                self.coeffs.pop();
            } else {
                return true;
            }
        }
        false
    }

    /// Divides every coefficient by the largest magnitude.
    ///
    /// Scaling by a positive factor leaves the signs of all values intact.
    /// The zero polynomial is left alone.
    pub fn normalize(&mut self) {
        let m = self.magnitude();
        if m > 0.0 && m.is_finite() {
            for c in &mut self.coeffs {
                *c /= m;
            }
        }
    }
}

impl<const N: usize> From<Poly<N>> for PolyDyn {
    fn from(p: Poly<N>) -> Self {
        PolyDyn::new(p.coeffs)
    }
}
