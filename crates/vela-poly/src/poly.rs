//! The user-visible polynomial type.
//!
//! A [`Polynomial`] owns a sparse coefficient tree ([`crate::node`]) plus
//! a cached total degree. The absent tree is the identically-zero
//! polynomial: a meaningful state, not an error, on which every read
//! returns 0 and the degree is 0.

use std::fmt;

use smallvec::smallvec;

use crate::error::{PolyError, Result};
use crate::node::{Node, PowerVec};

/// A sparse N-dimensional polynomial with `f64` coefficients.
///
/// Coefficients are addressed by power vectors: the coefficient of
/// `x^2 * y^3` in a 2D polynomial lives at powers `[2, 3]`. Reading a
/// coefficient that was never set yields zero; setting a coefficient to
/// zero is indistinguishable from never having set it.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    /// Number of independent variables, fixed at creation.
    dim: usize,
    /// Cached total degree; 0 for the zero polynomial.
    degree: u32,
    /// Root of the coefficient tree; `None` is the zero polynomial.
    root: Option<Box<Node>>,
}

impl Polynomial {
    /// Creates the zero polynomial in `dim` variables.
    ///
    /// # Errors
    ///
    /// [`PolyError::ZeroDimension`] when `dim` is 0.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(PolyError::ZeroDimension);
        }
        Ok(Self {
            dim,
            degree: 0,
            root: None,
        })
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Returns the total degree; 0 for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.root.is_none()
    }

    /// Reads the coefficient at the given power vector.
    ///
    /// Powers beyond the populated tree read as zero.
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] when the power vector length does
    /// not match the polynomial's dimension.
    pub fn coefficient(&self, powers: &[u32]) -> Result<f64> {
        self.check_powers(powers)?;
        Ok(self.root.as_ref().map_or(0.0, |root| root.get(powers)))
    }

    /// Writes the coefficient at the given power vector.
    ///
    /// A zero `value` deletes the coefficient, pruning any subtree that
    /// collapses with it; the whole polynomial may become zero.
    ///
    /// # Errors
    ///
    /// [`PolyError::DimensionMismatch`] when the power vector length does
    /// not match the polynomial's dimension.
    pub fn set_coefficient(&mut self, powers: &[u32], value: f64) -> Result<()> {
        self.check_powers(powers)?;
        self.set_unchecked(powers, value);
        Ok(())
    }

    /// Compares two polynomials coefficient-by-coefficient.
    ///
    /// True when every coefficient difference is within `tolerance`.
    /// Polynomials of different dimensions are never equal. Comparison
    /// runs over the union of both monomial sets, so an unset coefficient
    /// compares as zero.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        if self.dim != other.dim {
            return false;
        }
        Node::max_abs_diff(self.root.as_deref(), other.root.as_deref()) <= tolerance
    }

    /// Internal zero-polynomial constructor for pre-validated dimensions.
    pub(crate) fn zero(dim: usize) -> Self {
        debug_assert!(dim >= 1);
        Self {
            dim,
            degree: 0,
            root: None,
        }
    }

    /// The coefficient of the all-zero power vector.
    pub(crate) fn constant_term(&self) -> f64 {
        let zeros: PowerVec = smallvec![0; self.dim];
        self.root.as_ref().map_or(0.0, |root| root.get(&zeros))
    }

    pub(crate) fn check_powers(&self, powers: &[u32]) -> Result<()> {
        if powers.len() == self.dim {
            Ok(())
        } else {
            Err(PolyError::DimensionMismatch {
                expected: self.dim,
                got: powers.len(),
            })
        }
    }

    pub(crate) fn require_same_dim(&self, other: &Self) -> Result<()> {
        if self.dim == other.dim {
            Ok(())
        } else {
            Err(PolyError::IncompatibleDimensions {
                left: self.dim,
                right: other.dim,
            })
        }
    }

    /// Writes a coefficient with the power vector already validated.
    pub(crate) fn set_unchecked(&mut self, powers: &[u32], value: f64) {
        debug_assert_eq!(powers.len(), self.dim);
        if value == 0.0 {
            self.delete_coefficient(powers);
            return;
        }
        let dim = self.dim;
        let root = self
            .root
            .get_or_insert_with(|| Box::new(Node::empty(dim)));
        root.set(powers, value);
        let power_sum: u32 = powers.iter().sum();
        self.degree = self.degree.max(power_sum);
    }

    /// Adds `value` onto the coefficient at `powers`.
    pub(crate) fn accumulate(&mut self, powers: &[u32], value: f64) {
        let current = self.root.as_ref().map_or(0.0, |root| root.get(powers));
        self.set_unchecked(powers, current + value);
    }

    /// Deletes a coefficient and prunes upward from it.
    ///
    /// The degree is recomputed only when the deleted power-sum equalled
    /// the cached degree; a full tree walk is accepted on that path.
    fn delete_coefficient(&mut self, powers: &[u32]) {
        if self
            .root
            .as_mut()
            .map_or(false, |root| root.delete(powers))
        {
            self.root = None;
        }
        let power_sum: u32 = powers.iter().sum();
        if power_sum == self.degree {
            self.recompute_degree();
        }
    }

    /// Re-establishes the invariants after arithmetic on the tree:
    /// prunes collapsed branches and refreshes the cached degree.
    pub(crate) fn prune(&mut self) {
        if self.root.as_mut().map_or(false, |root| root.prune()) {
            self.root = None;
        }
        self.recompute_degree();
    }

    pub(crate) fn recompute_degree(&mut self) {
        self.degree = self.root.as_ref().map_or(0, |root| root.max_power_sum());
    }

    pub(crate) fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub(crate) fn root_mut(&mut self) -> &mut Option<Box<Node>> {
        &mut self.root
    }

    /// 1D fast path: the leaf coefficient array, or `None` for zero.
    pub(crate) fn coeffs_1d(&self) -> Option<&[f64]> {
        debug_assert_eq!(self.dim, 1);
        match self.root.as_deref() {
            Some(Node::Leaf(coeffs)) => Some(coeffs),
            _ => None,
        }
    }

    /// Visits every non-zero monomial as `(powers, coefficient)`.
    pub(crate) fn for_each_term(&self, mut f: impl FnMut(&[u32], f64)) {
        let Some(root) = self.root.as_deref() else {
            return;
        };
        let mut powers: PowerVec = smallvec![0; self.dim];
        root.visit_terms(self.dim - 1, &mut powers, &mut f);
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        self.for_each_term(|powers, c| {
            let mon = monomial_string(powers);
            if mon == "1" {
                terms.push(format!("{c}"));
            } else {
                terms.push(format!("{c}*{mon}"));
            }
        });

        write!(f, "{}", terms.join(" + "))
    }
}

/// Formats a power vector as a human-readable monomial.
fn monomial_string(powers: &[u32]) -> String {
    const VARS: [char; 6] = ['x', 'y', 'z', 'w', 'u', 'v'];
    let mut parts = Vec::new();

    for (i, &e) in powers.iter().enumerate() {
        if e > 0 {
            let name = if i < VARS.len() {
                VARS[i].to_string()
            } else {
                format!("x{i}")
            };
            if e == 1 {
                parts.push(name);
            } else {
                parts.push(format!("{name}^{e}"));
            }
        }
    }

    if parts.is_empty() {
        "1".to_string()
    } else {
        parts.join("*")
    }
}
