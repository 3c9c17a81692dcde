//! Dense matrix implementation for small matrices.
//!
//! Dense matrices are a good fit for the normal-equations systems built
//! by polynomial fitting: a handful of rows and columns, accessed in
//! simple patterns where cache locality matters more than sparsity.

use std::ops::{Index, IndexMut};

use num_traits::Float;
use rayon::prelude::*;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    /// Matrix entries in row-major order.
    data: Vec<T>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<T: Float> DenseMatrix<T> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![T::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<T> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Wraps an existing row-major buffer without copying.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length is not `num_rows * num_cols`.
    #[must_use]
    pub fn from_vec(data: Vec<T>, num_rows: usize, num_cols: usize) -> Self {
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Matrix-vector multiply: y = A * x.
    #[must_use]
    pub fn mv(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }

    /// Transposed matrix-vector multiply: y = Aᵗ * x.
    #[must_use]
    pub fn tmv(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.num_rows);
        (0..self.num_cols)
            .map(|col| {
                (0..self.num_rows).fold(T::zero(), |acc, row| acc + self[(row, col)] * x[row])
            })
            .collect()
    }

    /// Matrix-matrix multiply: C = A * B.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                let mut sum = T::zero();
                for k in 0..self.num_cols {
                    sum = sum + self[(i, k)] * other[(k, j)];
                }
                result[(i, j)] = sum;
            }
        }
        result
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }
}

impl<T: Float + Send + Sync> DenseMatrix<T> {
    /// Normal-equations product (parallel): N = Aᵗ * A.
    ///
    /// The result is symmetric positive semi-definite; result rows are
    /// computed independently across a rayon pool.
    #[must_use]
    pub fn normal_matrix(&self) -> Self {
        let n = self.num_cols;
        let data: Vec<T> = (0..n)
            .into_par_iter()
            .flat_map(|i| {
                (0..n)
                    .map(|j| {
                        let mut sum = T::zero();
                        for row in 0..self.num_rows {
                            sum = sum + self[(row, i)] * self[(row, j)];
                        }
                        sum
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            data,
            num_rows: n,
            num_cols: n,
        }
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}
