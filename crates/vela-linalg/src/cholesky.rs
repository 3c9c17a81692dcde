//! Cholesky factorisation and symmetric positive-definite solving.
//!
//! Normal-equations matrices are symmetric and, for well-posed fits,
//! positive definite. The factorisation detects the ill-posed case (a
//! non-positive pivot) and reports it as a singular system instead of
//! producing garbage coefficients.

use num_traits::Float;
use thiserror::Error;

use crate::dense_matrix::DenseMatrix;

/// Errors reported by the linear solvers.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinAlgError {
    /// The decomposition needs a square matrix.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare {
        /// Number of rows of the offending matrix.
        rows: usize,
        /// Number of columns of the offending matrix.
        cols: usize,
    },

    /// The matrix is singular or not positive definite.
    #[error("matrix is singular or not positive definite")]
    Singular,
}

impl<T: Float> DenseMatrix<T> {
    /// Computes the lower-triangular Cholesky factor L with A = L * Lᵗ.
    ///
    /// Only the lower triangle of `self` is read, so it is enough to fill
    /// that half of a symmetric matrix.
    ///
    /// # Errors
    ///
    /// [`LinAlgError::NotSquare`] for a non-square input,
    /// [`LinAlgError::Singular`] when a pivot is not strictly positive.
    pub fn cholesky(&self) -> Result<Self, LinAlgError> {
        if !self.is_square() {
            return Err(LinAlgError::NotSquare {
                rows: self.num_rows(),
                cols: self.num_cols(),
            });
        }

        let n = self.num_rows();
        let mut l = Self::zeros(n, n);

        for i in 0..n {
            for j in 0..=i {
                let mut sum = self[(i, j)];
                for k in 0..j {
                    sum = sum - l[(i, k)] * l[(j, k)];
                }

                if i == j {
                    if sum <= T::zero() {
                        return Err(LinAlgError::Singular);
                    }
                    l[(i, j)] = sum.sqrt();
                } else {
                    // The pivot check above keeps every diagonal entry positive.
                    l[(i, j)] = sum / l[(j, j)];
                }
            }
        }

        Ok(l)
    }

    /// Solves the symmetric positive-definite system A x = b.
    ///
    /// Factors A = L Lᵗ, then forward- and back-substitutes.
    ///
    /// # Errors
    ///
    /// See [`DenseMatrix::cholesky`].
    ///
    /// # Panics
    ///
    /// Panics if `b` does not match the matrix size.
    pub fn solve_spd(&self, b: &[T]) -> Result<Vec<T>, LinAlgError> {
        let l = self.cholesky()?;
        let n = l.num_rows();
        assert_eq!(b.len(), n);

        // Forward substitution: L z = b
        let mut z = b.to_vec();
        for i in 0..n {
            let mut sum = z[i];
            for k in 0..i {
                sum = sum - l[(i, k)] * z[k];
            }
            z[i] = sum / l[(i, i)];
        }

        // Back substitution: Lᵗ x = z
        let mut x = z;
        for i in (0..n).rev() {
            let mut sum = x[i];
            for k in i + 1..n {
                sum = sum - l[(k, i)] * x[k];
            }
            x[i] = sum / l[(i, i)];
        }

        Ok(x)
    }
}
