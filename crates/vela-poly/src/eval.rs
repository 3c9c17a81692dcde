//! Polynomial evaluation.
//!
//! All evaluation is nested Horner: a 1D polynomial is a Horner pass over
//! its leaf coefficients, and an N-dimensional polynomial is a Horner
//! pass in its outermost variable whose "coefficients" are the child
//! polynomials, evaluated recursively. Horner steps run through
//! `f64::mul_add` so each coefficient costs a single rounding.

use crate::error::{PolyError, Result};
use crate::poly::Polynomial;

impl Polynomial {
    /// Evaluates the polynomial at `point`.
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] when `point` has the wrong length.
    pub fn eval(&self, point: &[f64]) -> Result<f64> {
        if point.len() != self.dimension() {
            return Err(PolyError::DimensionMismatch {
                expected: self.dimension(),
                got: point.len(),
            });
        }
        Ok(self.root().map_or(0.0, |root| root.eval(point)))
    }

    /// Evaluates a 1D polynomial at `x`.
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] unless the polynomial is 1D.
    pub fn eval_1d(&self, x: f64) -> Result<f64> {
        self.require_1d()?;
        let Some(coeffs) = self.coeffs_1d() else {
            return Ok(0.0);
        };
        let mut acc = 0.0f64;
        for &c in coeffs.iter().rev() {
            acc = acc.mul_add(x, c);
        }
        Ok(acc)
    }

    /// Evaluates a 1D polynomial and its derivative at `x` in one pass.
    ///
    /// Returns `(p(x), p'(x))` from a single nested Horner loop: the
    /// derivative accumulator is the Horner recurrence differentiated.
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] unless the polynomial is 1D.
    pub fn eval_1d_with_derivative(&self, x: f64) -> Result<(f64, f64)> {
        self.require_1d()?;
        let Some(coeffs) = self.coeffs_1d() else {
            return Ok((0.0, 0.0));
        };
        let n = coeffs.len();
        let mut value = coeffs[n - 1];
        let mut derivative = 0.0f64;
        for &c in coeffs[..n - 1].iter().rev() {
            derivative = derivative.mul_add(x, value);
            value = value.mul_add(x, c);
        }
        Ok((value, derivative))
    }

    /// Evaluates `p(a) - p(b)` without catastrophic cancellation.
    ///
    /// Returns `(p(a) - p(b), p(a))`. The difference comes from the
    /// divided-difference Horner recurrence, `(a - b) * q(a, b)`, so it
    /// stays accurate when `a` and `b` are close. This is the residual
    /// primitive the root solver is built on.
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] unless the polynomial is 1D.
    pub fn eval_1d_diff(&self, a: f64, b: f64) -> Result<(f64, f64)> {
        self.require_1d()?;
        let Some(coeffs) = self.coeffs_1d() else {
            return Ok((0.0, 0.0));
        };
        let n = coeffs.len();
        let mut p_a = coeffs[n - 1];
        let mut q = 0.0f64;
        for &c in coeffs[..n - 1].iter().rev() {
            q = q.mul_add(b, p_a);
            p_a = p_a.mul_add(a, c);
        }
        Ok(((a - b) * q, p_a))
    }

    fn require_1d(&self) -> Result<()> {
        if self.dimension() == 1 {
            Ok(())
        } else {
            Err(PolyError::DimensionMismatch {
                expected: 1,
                got: self.dimension(),
            })
        }
    }
}
