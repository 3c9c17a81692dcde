//! Polynomial algebra: addition, subtraction, multiplication, scaling.
//!
//! Binary operations return a freshly-built polynomial, so an output can
//! never overlap an input mid-computation; the product in particular is
//! always accumulated into independent storage and handed over whole.

use crate::error::Result;
use crate::node::Node;
use crate::poly::Polynomial;

impl Polynomial {
    /// Adds two polynomials.
    ///
    /// # Errors
    ///
    /// [`crate::PolyError::IncompatibleDimensions`] when the operands
    /// have different dimensions.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.require_same_dim(other)?;
        let mut out = self.clone();
        out.add_scaled_in_place(other, 1.0);
        Ok(out)
    }

    /// Subtracts `other` from `self`.
    ///
    /// # Errors
    ///
    /// [`crate::PolyError::IncompatibleDimensions`] when the operands
    /// have different dimensions.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.require_same_dim(other)?;
        let mut out = self.clone();
        out.add_scaled_in_place(other, -1.0);
        Ok(out)
    }

    /// Multiplies two polynomials.
    ///
    /// For every non-zero monomial `(k, c)` of `other`, `self` is scaled
    /// by `c` and accumulated at offset `k` in every dimension at once.
    ///
    /// # Errors
    ///
    /// [`crate::PolyError::IncompatibleDimensions`] when the operands
    /// have different dimensions.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.require_same_dim(other)?;
        let mut out = Polynomial::zero(self.dimension());

        let Some(self_root) = self.root() else {
            return Ok(out);
        };
        if other.is_zero() {
            return Ok(out);
        }

        let mut acc = Node::empty(self.dimension());
        other.for_each_term(|powers, c| {
            Node::accumulate_shifted(&mut acc, self_root, powers, c);
        });
        *out.root_mut() = Some(Box::new(acc));
        // Cancellation can hollow out the accumulated tree.
        out.prune();
        Ok(out)
    }

    /// Multiplies by a scalar, returning a new polynomial.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        let mut out = self.clone();
        out.scale_in_place(factor);
        out
    }

    /// Multiplies by a scalar in place.
    ///
    /// A zero factor clears to the zero polynomial without touching the
    /// error channel.
    pub fn scale_in_place(&mut self, factor: f64) {
        if factor == 0.0 {
            *self.root_mut() = None;
            self.recompute_degree();
            return;
        }
        if let Some(root) = self.root_mut().as_deref_mut() {
            root.scale(factor);
        }
        // Scaling can underflow a coefficient to zero.
        self.prune();
    }

    /// Merges `factor * other` into `self` and restores the invariants.
    pub(crate) fn add_scaled_in_place(&mut self, other: &Self, factor: f64) {
        debug_assert_eq!(self.dimension(), other.dimension());
        match (self.root_mut().as_deref_mut(), other.root()) {
            (_, None) => return,
            (Some(dst), Some(src)) => dst.add_scaled(src, factor),
            (None, Some(src)) => {
                let mut copy = src.clone();
                copy.scale(factor);
                *self.root_mut() = Some(Box::new(copy));
            }
        }
        self.prune();
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
    fn test_add_basic() {
        let p = poly_1d(&[1.0, 2.0]);
        let q = poly_1d(&[3.0, 4.0, 5.0]);
        let sum = p.add(&q).unwrap();
        assert_eq!(sum.coefficient(&[0]).unwrap(), 4.0);
        assert_eq!(sum.coefficient(&[1]).unwrap(), 6.0);
        assert_eq!(sum.coefficient(&[2]).unwrap(), 5.0);
        assert_eq!(sum.degree(), 2);
    }

    #[test]
    fn test_sub_cancels_leading_terms() {
        let p = poly_1d(&[1.0, 0.0, 2.0]);
        let q = poly_1d(&[0.0, 3.0, 2.0]);
        let diff = p.sub(&q).unwrap();
        assert_eq!(diff.degree(), 1);
        assert_eq!(diff.coefficient(&[0]).unwrap(), 1.0);
        assert_eq!(diff.coefficient(&[1]).unwrap(), -3.0);
        assert_eq!(diff.coefficient(&[2]).unwrap(), 0.0);
    }

    #[test]
    fn test_sub_self_is_zero() {
        let mut p = Polynomial::new(2).unwrap();
        p.set_coefficient(&[1, 2], 3.0).unwrap();
        p.set_coefficient(&[0, 1], -1.0).unwrap();
        let diff = p.sub(&p).unwrap();
        assert!(diff.is_zero());
        assert_eq!(diff.degree(), 0);
    }

    #[test]
    fn test_mul_1d() {
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        let p = poly_1d(&[1.0, 2.0]);
        let q = poly_1d(&[3.0, 4.0]);
        let prod = p.mul(&q).unwrap();
        assert_eq!(prod.coefficient(&[0]).unwrap(), 3.0);
        assert_eq!(prod.coefficient(&[1]).unwrap(), 10.0);
        assert_eq!(prod.coefficient(&[2]).unwrap(), 8.0);
        assert_eq!(prod.degree(), 2);
    }

    #[test]
    fn test_mul_multivariate_degree() {
        let mut p = Polynomial::new(2).unwrap();
        p.set_coefficient(&[1, 0], 1.0).unwrap();
        p.set_coefficient(&[0, 1], 1.0).unwrap();
        // (x + y)^2 = x^2 + 2xy + y^2
        let sq = p.mul(&p).unwrap();
        assert_eq!(sq.degree(), 2);
        assert_eq!(sq.coefficient(&[2, 0]).unwrap(), 1.0);
        assert_eq!(sq.coefficient(&[1, 1]).unwrap(), 2.0);
        assert_eq!(sq.coefficient(&[0, 2]).unwrap(), 1.0);
    }

    #[test]
    fn test_mul_commutative_and_distributive() {
        let a = poly_1d(&[1.0, -2.0, 3.0]);
        let b = poly_1d(&[4.0, 5.0]);
        let c = poly_1d(&[-1.0, 0.0, 2.0]);

        assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());

        let left = a.mul(&b.add(&c).unwrap()).unwrap();
        let right = a.mul(&b).unwrap().add(&a.mul(&c).unwrap()).unwrap();
        assert!(left.approx_eq(&right, 1e-12));
    }

    #[test]
    fn test_mul_by_zero() {
        let p = poly_1d(&[1.0, 2.0]);
        let zero = Polynomial::new(1).unwrap();
        assert!(p.mul(&zero).unwrap().is_zero());
        assert!(zero.mul(&p).unwrap().is_zero());
    }

    #[test]
    fn test_scale() {
        let p = poly_1d(&[1.0, -2.0]);
        let doubled = p.scale(2.0);
        assert_eq!(doubled.coefficient(&[0]).unwrap(), 2.0);
        assert_eq!(doubled.coefficient(&[1]).unwrap(), -4.0);

        let cleared = p.scale(0.0);
        assert!(cleared.is_zero());
        assert_eq!(cleared.degree(), 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let p = Polynomial::new(1).unwrap();
        let q = Polynomial::new(2).unwrap();
        assert!(p.add(&q).is_err());
        assert!(p.sub(&q).is_err());
        assert!(p.mul(&q).is_err());
    }

    #[test]
    fn test_repeated_root_multiplication_raises_degree() {
        // Multiplying by (x - r) adds the root r once per factor.
        let r = 0.5;
        let factor = poly_1d(&[-r, 1.0]);
        let mut p = factor.clone();
        for expected_degree in 2..=5u32 {
            p = p.mul(&factor).unwrap();
            assert_eq!(p.degree(), expected_degree);
            assert!(p.eval_1d(r).unwrap().abs() < 1e-15);
        }
    }
}
