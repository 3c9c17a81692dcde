//! Calculus on polynomials: derivatives, coordinate shifts, extraction.
//!
//! All three operations work structurally on the coefficient tree. The
//! shift of a non-innermost variable transposes the target dimension to
//! the innermost position first, so one binomial recurrence serves every
//! dimension at an O(number of coefficients) data-movement cost.

use crate::error::{PolyError, Result};
use crate::node::{Node, PowerVec};
use crate::poly::Polynomial;

impl Polynomial {
    /// Differentiates in place with respect to variable `dim`.
    ///
    /// The dimension count is unchanged: the differentiated variable may
    /// vanish from the expression, but the polynomial stays formally
    /// N-dimensional. Differentiating away the last term leaves the zero
    /// polynomial.
    ///
    /// # Errors
    ///
    /// [`PolyError::IndexOutOfRange`] when `dim` is not a valid variable
    /// index.
    pub fn derivative(&mut self, dim: usize) -> Result<()> {
        if dim >= self.dimension() {
            return Err(PolyError::IndexOutOfRange {
                index: dim,
                dimension: self.dimension(),
            });
        }

        let level = self.dimension() - 1;
        let collapsed = match self.root_mut().as_deref_mut() {
            Some(root) => differentiate(root, level, dim),
            None => false,
        };
        if collapsed {
            *self.root_mut() = None;
        }
        self.recompute_degree();
        Ok(())
    }

    /// Shifts variable `dim` in place: `p(.., x, ..)` becomes
    /// `p(.., x + offset, ..)`.
    ///
    /// The innermost dimension is shifted directly by the binomial
    /// recurrence; any other dimension is transposed to the innermost
    /// position, shifted there, and transposed back.
    ///
    /// # Errors
    ///
    /// [`PolyError::IndexOutOfRange`] when `dim` is not a valid variable
    /// index.
    pub fn shift(&mut self, dim: usize, offset: f64) -> Result<()> {
        if dim >= self.dimension() {
            return Err(PolyError::IndexOutOfRange {
                index: dim,
                dimension: self.dimension(),
            });
        }
        if self.is_zero() || offset == 0.0 {
            return Ok(());
        }

        if dim == 0 {
            if let Some(root) = self.root_mut().as_deref_mut() {
                shift_innermost(root, offset);
            }
        } else {
            let mut swapped = self.transposed_with_first(dim);
            if let Some(root) = swapped.root_mut().as_deref_mut() {
                shift_innermost(root, offset);
            }
            *self = swapped.transposed_with_first(dim);
        }
        Ok(())
    }

    /// Collapses dimension `dim` by substituting a constant for it.
    ///
    /// `replacement` must have one dimension less than `self` and degree
    /// 0; substituting a non-constant polynomial is not generalised.
    /// The substitution is Horner's rule lifted to the tree: from the
    /// highest power of the collapsed variable downward, the accumulator
    /// polynomial is scaled by the constant and the next coefficient
    /// slice is added in.
    ///
    /// # Errors
    ///
    /// [`PolyError::InvalidArgument`] on a 1D polynomial,
    /// [`PolyError::IndexOutOfRange`] for a bad `dim`,
    /// [`PolyError::IncompatibleDimensions`] when the replacement has the
    /// wrong dimension, and [`PolyError::Unsupported`] when it is not
    /// constant.
    pub fn extract(&self, dim: usize, replacement: &Polynomial) -> Result<Polynomial> {
        if self.dimension() < 2 {
            return Err(PolyError::InvalidArgument(
                "extraction needs at least two dimensions",
            ));
        }
        if dim >= self.dimension() {
            return Err(PolyError::IndexOutOfRange {
                index: dim,
                dimension: self.dimension(),
            });
        }
        if replacement.dimension() != self.dimension() - 1 {
            return Err(PolyError::IncompatibleDimensions {
                left: self.dimension(),
                right: replacement.dimension(),
            });
        }
        if replacement.degree() > 0 {
            return Err(PolyError::Unsupported(
                "extraction with a non-constant replacement polynomial",
            ));
        }

        let out_dim = self.dimension() - 1;
        if self.is_zero() {
            return Ok(Polynomial::zero(out_dim));
        }

        let constant = replacement.constant_term();
        let mut top = 0u32;
        self.for_each_term(|powers, _| top = top.max(powers[dim]));

        let mut acc = Polynomial::zero(out_dim);
        for power in (0..=top).rev() {
            acc.scale_in_place(constant);
            self.for_each_term(|powers, c| {
                if powers[dim] == power {
                    let mut reduced = PowerVec::from_slice(powers);
                    reduced.remove(dim);
                    acc.accumulate(&reduced, c);
                }
            });
        }
        acc.prune();
        Ok(acc)
    }

    /// Rebuilds the polynomial with powers of dimension 0 and `dim`
    /// exchanged. Applying it twice restores the original.
    fn transposed_with_first(&self, dim: usize) -> Polynomial {
        let mut out = Polynomial::zero(self.dimension());
        self.for_each_term(|powers, c| {
            let mut swapped = PowerVec::from_slice(powers);
            swapped.swap(0, dim);
            out.set_unchecked(&swapped, c);
        });
        out
    }
}

/// Recursive partial derivative; returns true if the subtree collapsed.
fn differentiate(node: &mut Node, level: usize, target: usize) -> bool {
    if level == target {
        match node {
            Node::Leaf(coeffs) => {
                if coeffs.len() <= 1 {
                    coeffs.clear();
                    return true;
                }
                coeffs.remove(0);
                for (i, c) in coeffs.iter_mut().enumerate() {
                    *c *= (i + 1) as f64;
                }
                false
            }
            Node::Interior(children) => {
                if children.len() <= 1 {
                    children.clear();
                    return true;
                }
                children.remove(0);
                for (i, slot) in children.iter_mut().enumerate() {
                    if let Some(child) = slot {
                        child.scale((i + 1) as f64);
                    }
                }
                false
            }
        }
    } else {
        // Above the target level: differentiate every child; children
        // constant in the target variable collapse to zero.
        let Node::Interior(children) = node else {
            unreachable!("leaf reached above the target level");
        };
        for slot in children.iter_mut() {
            if let Some(child) = slot {
                if differentiate(child, level - 1, target) {
                    *slot = None;
                }
            }
        }
        while matches!(children.last(), Some(None)) {
            children.pop();
        }
        children.is_empty()
    }
}

/// Applies the binomial-expansion recurrence for `x -> x + u` to every
/// leaf coefficient array under `node`.
fn shift_innermost(node: &mut Node, u: f64) {
    match node {
        Node::Leaf(coeffs) => shift_coeffs(coeffs, u),
        Node::Interior(children) => {
            for child in children.iter_mut().flatten() {
                shift_innermost(child, u);
            }
        }
    }
}

/// In-place shift of a 1D coefficient array.
///
/// Pass `j` folds one factor of `u` down the array; after all passes
/// `coeffs[k]` holds the coefficient of `x^k` in `p(x + u)`. The leading
/// coefficient is never touched, so the tree shape is preserved.
fn shift_coeffs(coeffs: &mut [f64], u: f64) {
    let n = coeffs.len();
    for j in 0..n.saturating_sub(1) {
        for i in 1..n - j {
            coeffs[n - 1 - i] = coeffs[n - i].mul_add(u, coeffs[n - 1 - i]);
        }
    }
}
