//! 1D root solving: accelerated Newton-Raphson with multiplicity.
//!
//! The residual and derivative come from one joint Horner pass per
//! iteration. The stopping heuristics are deliberately conservative:
//! the correction is considered stalled as soon as `|r/d|` stops
//! shrinking (tested cross-multiplied, so no division is needed), and a
//! "converged" result whose residual is out of scale with both the
//! derivative and the coefficients is rejected rather than returned.

use crate::error::{PolyError, Result};
use crate::poly::Polynomial;

/// Iteration budget per stored coefficient.
const MAX_ITERATIONS_PER_COEFFICIENT: usize = 100;

impl Polynomial {
    /// Finds a root of a 1D polynomial by Newton-Raphson.
    ///
    /// `multiplicity` is the assumed multiplicity of the root being
    /// sought; the update `x -= multiplicity * p(x) / p'(x)` restores
    /// quadratic convergence at a multiple root. Use 1 for simple roots.
    ///
    /// The zero polynomial's root is defined as exactly 0. A non-zero
    /// constant has no root and reports [`PolyError::DivisionByZero`].
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] unless the polynomial is 1D,
    /// [`PolyError::InvalidArgument`] for a zero multiplicity,
    /// [`PolyError::DivisionByZero`] when the iteration hits a zero
    /// derivative away from a root (or the residual check fails), and
    /// [`PolyError::NoConvergence`] when the iteration budget runs out;
    /// the error carries the last iterate.
    pub fn solve_1d(&self, first_guess: f64, multiplicity: u32) -> Result<f64> {
        self.solve_1d_inner(first_guess, multiplicity, false)
    }

    /// Like [`Polynomial::solve_1d`], for a known-increasing branch.
    ///
    /// Fails with [`PolyError::InvalidArgument`] as soon as the
    /// derivative stops being positive, instead of wandering off the
    /// monotonic interval the caller promised.
    ///
    /// # Errors
    ///
    /// See [`Polynomial::solve_1d`].
    pub fn solve_1d_monotonic(&self, first_guess: f64, multiplicity: u32) -> Result<f64> {
        self.solve_1d_inner(first_guess, multiplicity, true)
    }

    fn solve_1d_inner(
        &self,
        first_guess: f64,
        multiplicity: u32,
        require_increasing: bool,
    ) -> Result<f64> {
        if self.dimension() != 1 {
            return Err(PolyError::DimensionMismatch {
                expected: 1,
                got: self.dimension(),
            });
        }
        if multiplicity == 0 {
            return Err(PolyError::InvalidArgument(
                "root multiplicity must be at least 1",
            ));
        }

        let Some(coeffs) = self.coeffs_1d() else {
            // The zero polynomial vanishes everywhere; its root is
            // defined as 0 regardless of the first guess.
            return Ok(0.0);
        };
        if coeffs.len() == 1 {
            return Err(PolyError::DivisionByZero);
        }

        let m = f64::from(multiplicity);
        let budget = coeffs.len() * MAX_ITERATIONS_PER_COEFFICIENT;
        let mut x = first_guess;
        let mut residual_prev = f64::INFINITY;
        let mut derivative_prev = 1.0f64;
        let mut converged = false;

        for _ in 0..budget {
            let (residual, derivative) = self.eval_1d_with_derivative(x)?;

            if require_increasing && derivative <= 0.0 {
                return Err(PolyError::InvalidArgument(
                    "derivative not positive on the requested branch",
                ));
            }

            if derivative == 0.0 {
                if residual == 0.0 {
                    // Landed exactly on a multiple root.
                    converged = true;
                    break;
                }
                return Err(PolyError::DivisionByZero);
            }

            // |r/d| >= |r_prev/d_prev| means the correction stopped
            // improving; keep the current iterate.
            if (residual * derivative_prev).abs() >= (residual_prev * derivative).abs() {
                converged = true;
                break;
            }

            let delta = m * residual / derivative;
            x -= delta;

            if delta.abs() <= x.abs() * f64::EPSILON {
                converged = true;
                break;
            }

            residual_prev = residual;
            derivative_prev = derivative;
        }

        if !converged {
            return Err(PolyError::NoConvergence {
                iterations: budget,
                best: x,
            });
        }

        // A residual out of scale with both the derivative and the
        // coefficients means the stall was not actually at a root
        // (typically a multiple root solved with the wrong multiplicity).
        let (residual, derivative) = self.eval_1d_with_derivative(x)?;
        let coeff_max = self.root().map_or(0.0, crate::node::Node::max_abs);
        if residual != 0.0
            && residual.abs() > derivative.abs()
            && residual.abs() > coeff_max * f64::EPSILON
        {
            return Err(PolyError::DivisionByZero);
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly_1d(coeffs: &[f64]) -> Polynomial {
        let mut p = Polynomial::new(1).unwrap();
        for (i, &c) in coeffs.iter().enumerate() {
            p.set_coefficient(&[i as u32], c).unwrap();
        }
        p
    }

    #[test]
    fn test_linear_root_exact() {
        // p(x) = x - 1 from x0 = 5 must land exactly on 1.
        let p = poly_1d(&[-1.0, 1.0]);
        let root = p.solve_1d(5.0, 1).unwrap();
        assert_eq!(root, 1.0);
        assert_eq!(p.eval_1d(root).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_polynomial_root_is_zero() {
        let p = Polynomial::new(1).unwrap();
        assert_eq!(p.solve_1d(42.0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_constant_has_no_root() {
        let p = poly_1d(&[3.0]);
        assert_eq!(p.solve_1d(0.0, 1), Err(PolyError::DivisionByZero));
    }

    #[test]
    fn test_quadratic_simple_roots() {
        // p(x) = (x - 2)(x + 3) = x^2 + x - 6
        let p = poly_1d(&[-6.0, 1.0, 1.0]);
        let root = p.solve_1d(10.0, 1).unwrap();
        assert!((root - 2.0).abs() < 1e-12);
        let other = p.solve_1d(-10.0, 1).unwrap();
        assert!((other + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_multiple_root_with_multiplicity() {
        // Build (x - 1/2)^k by repeated multiplication, then recover the
        // root with the matching multiplicity.
        let factor = poly_1d(&[-0.5, 1.0]);
        let mut p = factor.clone();
        for k in 2..=4u32 {
            p = p.mul(&factor).unwrap();
            let root = p.solve_1d(3.0, k).unwrap();
            assert!((root - 0.5).abs() < 1e-10);
            assert!(p.eval_1d(root).unwrap().abs() < 1e-10);
        }
    }

    #[test]
    fn test_monotonic_branch_guard() {
        // p(x) = x^2 - 4 has negative derivative left of the origin.
        let p = poly_1d(&[-4.0, 0.0, 1.0]);
        assert!(p.solve_1d_monotonic(3.0, 1).is_ok());
        assert_eq!(
            p.solve_1d_monotonic(-3.0, 1),
            Err(PolyError::InvalidArgument(
                "derivative not positive on the requested branch"
            ))
        );
    }

    #[test]
    fn test_zero_derivative_away_from_root() {
        // p(x) = x^2 + 1 from the stationary point x = 0.
        let p = poly_1d(&[1.0, 0.0, 1.0]);
        assert_eq!(p.solve_1d(0.0, 1), Err(PolyError::DivisionByZero));
    }

    #[test]
    fn test_zero_multiplicity_rejected() {
        let p = poly_1d(&[-1.0, 1.0]);
        assert!(matches!(
            p.solve_1d(0.0, 0),
            Err(PolyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_requires_one_dimension() {
        let p = Polynomial::new(2).unwrap();
        assert!(matches!(
            p.solve_1d(0.0, 1),
            Err(PolyError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_high_degree_root() {
        // p(x) = x^15 - 1 has the simple real root 1.
        let mut p = Polynomial::new(1).unwrap();
        p.set_coefficient(&[15], 1.0).unwrap();
        p.set_coefficient(&[0], -1.0).unwrap();
        let root = p.solve_1d(2.0, 1).unwrap();
        assert!((root - 1.0).abs() < 1e-12);
    }
}
