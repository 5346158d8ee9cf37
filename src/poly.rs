// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomials of compile-time degree in the power basis.

/// A polynomial whose degree is known at compile-time.
///
/// The coefficients live in an array, constant term first, so a `Poly` is
/// `Copy` and cheap to pass around for the low degrees used here: cubics
/// for curve coordinates, sextics for their pairwise products and the
/// degree-9 resultant.
///
/// Multiplication would ideally be written as
///
/// ```ignore
/// impl<N, M> Mul<Poly<M>> for Poly<N> {
///     type Output = Poly<{M + N - 1}>;
/// }
/// ```
///
/// but that needs const generic expressions, so the handful of products we
/// need are generated by a macro instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poly<const N: usize> {
    pub(crate) coeffs: [f64; N],
}

/// A polynomial of degree 3, such as one coordinate of a cubic Bézier.
pub type Cubic = Poly<4>;

/// A polynomial of degree 6.
pub type Sextic = Poly<7>;

/// A polynomial of degree 9, such as the resultant of two cubics.
pub type Nonic = Poly<10>;

impl<const N: usize> Poly<N> {
    /// The zero polynomial.
    pub const ZERO: Self = Poly { coeffs: [0.0; N] };

    /// Creates a new polynomial with the provided coefficients.
    ///
    /// The constant coefficient comes first, then the linear coefficient, and
    /// so on. So if you pass `[c, b, a]` you'll get the polynomial
    /// `a x^2 + b x + c`.
    pub const fn new(coeffs: [f64; N]) -> Self {
        Poly { coeffs }
    }

    /// The coefficients of this polynomial.
    ///
    /// In the returned array, the coefficient of `x^i` is at index `i`.
    pub fn coeffs(&self) -> &[f64; N] {
        &self.coeffs
    }

    /// Evaluates this polynomial at a point, by Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        let mut acc = 0.0;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Returns the largest absolute value of any coefficient.
    ///
    /// Always returns a non-negative number. NaN coefficients are skipped,
    /// use [`Poly::is_finite`] to detect them.
    pub fn magnitude(&self) -> f64 {
        crate::common::max_abs(&self.coeffs)
    }

    /// Are all the coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// The polynomial whose coefficients are the absolute values of ours.
    ///
    /// Evaluating it at `|x|` bounds the magnitude of every term that
    /// contributes to `self.eval(x)`.
    #[must_use]
    pub fn abs(&self) -> Self {
        Poly {
            coeffs: self.coeffs.map(f64::abs),
        }
    }

    /// Copies the coefficients into a polynomial with `M` coefficients.
    ///
    /// Extra high-order coefficients are zero. If `M < N` the high-order
    /// coefficients are dropped.
    pub fn resize<const M: usize>(&self) -> Poly<M> {
        let mut coeffs = [0.0; M];
        for (d, c) in coeffs.iter_mut().zip(&self.coeffs) {
            *d = *c;
        }
        Poly { coeffs }
    }
}

macro_rules! impl_mul {
    ($N:literal, $M:literal, $OUT:literal) => {
        impl core::ops::Mul<Poly<$M>> for Poly<$N> {
            type Output = Poly<$OUT>;

            fn mul(self, rhs: Poly<$M>) -> Poly<$OUT> {
                let mut coeffs = [0.0; $OUT];
                for (i, c) in self.coeffs.iter().enumerate() {
                    for (j, d) in rhs.coeffs.iter().enumerate() {
                        coeffs[i + j] += c * d;
                    }
                }
                Poly::new(coeffs)
            }
        }
    };
}

impl_mul!(4, 4, 7);
impl_mul!(7, 4, 10);

impl<const N: usize> core::ops::Mul<f64> for Poly<N> {
    type Output = Self;

    fn mul(mut self, scale: f64) -> Self {
        self *= scale;
        self
    }
}

impl<const N: usize> core::ops::MulAssign<f64> for Poly<N> {
    fn mul_assign(&mut self, scale: f64) {
        for c in &mut self.coeffs {
            *c *= scale;
        }
    }
}

impl<const N: usize> core::ops::AddAssign<Poly<N>> for Poly<N> {
    fn add_assign(&mut self, rhs: Self) {
        for (c, d) in self.coeffs.iter_mut().zip(rhs.coeffs) {
            *c += d;
        }
    }
}

impl<const N: usize> core::ops::Add<Poly<N>> for Poly<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> core::ops::SubAssign<Poly<N>> for Poly<N> {
    fn sub_assign(&mut self, rhs: Self) {
        for (c, d) in self.coeffs.iter_mut().zip(rhs.coeffs) {
            *c -= d;
        }
    }
}

impl<const N: usize> core::ops::Sub<Poly<N>> for Poly<N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}
