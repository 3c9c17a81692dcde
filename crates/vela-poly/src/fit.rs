//! Least-squares polynomial fitting through normal equations.
//!
//! The 1D fit never materialises the Vandermonde matrix: the normal
//! matrix is a Hankel matrix whose entries are power sums of the sample
//! abscissas, so one pass over the samples fills everything. The 2D fit
//! builds the design matrix explicitly and forms `VᵗV` in parallel.
//! Both delegate the symmetric positive-definite solve to
//! [`vela_linalg`], and both leave a diagnosable error rather than
//! garbage coefficients when the sampling cannot support the requested
//! degrees.

use rustc_hash::FxHashSet;

use vela_linalg::DenseMatrix;

use crate::error::{PolyError, Result};
use crate::poly::Polynomial;

/// Degree policy for a least-squares fit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FitDegree {
    /// One bound on the total degree of every fitted monomial.
    Total {
        /// Smallest total degree fitted.
        min: u32,
        /// Largest total degree fitted.
        max: u32,
    },
    /// Independent per-dimension bounds, one `(min, max)` pair per axis.
    PerDimension(Vec<(u32, u32)>),
}

impl Polynomial {
    /// Fits a 1D polynomial with coefficients for powers
    /// `min_degree..=max_degree` to the samples `(xs[i], ys[i])`.
    ///
    /// When `min_degree` is 0 the abscissas are centred on their mean
    /// before the normal equations are formed (centring changes which
    /// monomials are fit otherwise), and the result is shifted back.
    /// `symmetric` asserts that the samples are symmetric around the
    /// centre, making odd power sums exactly zero instead of round-off
    /// sized.
    ///
    /// # Errors
    ///
    /// [`PolyError::SingularMatrix`] when there are fewer distinct
    /// abscissas than coefficients, [`PolyError::DivisionByZero`] for a
    /// degenerate single-coefficient fit with no signal, and the usual
    /// argument validation errors.
    pub fn fit_1d(
        xs: &[f64],
        ys: &[f64],
        min_degree: u32,
        max_degree: u32,
        symmetric: bool,
    ) -> Result<Polynomial> {
        if xs.is_empty() {
            return Err(PolyError::InvalidArgument("no sample points"));
        }
        if xs.len() != ys.len() {
            return Err(PolyError::DimensionMismatch {
                expected: xs.len(),
                got: ys.len(),
            });
        }
        if min_degree > max_degree {
            return Err(PolyError::InvalidArgument("min degree exceeds max degree"));
        }

        let coeff_count = (max_degree - min_degree + 1) as usize;
        if distinct_count(xs) < coeff_count {
            return Err(PolyError::SingularMatrix(
                "fewer distinct sample positions than coefficients",
            ));
        }

        // Centring only commutes with the fit when the constant term is
        // among the fitted monomials.
        let center = if min_degree == 0 { mean(xs) } else { 0.0 };
        let us: Vec<f64> = xs.iter().map(|&x| x - center).collect();

        let mut fitted = if coeff_count == 1 {
            Self::fit_single_coefficient(&us, ys, min_degree)?
        } else {
            Self::fit_hankel(&us, ys, min_degree, max_degree, symmetric)?
        };

        if center != 0.0 {
            fitted.shift(0, -center)?;
        }
        Ok(fitted)
    }

    /// Closed-form fit of the lone coefficient of `x^degree`.
    fn fit_single_coefficient(us: &[f64], ys: &[f64], degree: u32) -> Result<Polynomial> {
        let mut numerator = 0.0f64;
        let mut denominator = 0.0f64;
        for (&u, &y) in us.iter().zip(ys) {
            let basis = u.powi(degree as i32);
            numerator = y.mul_add(basis, numerator);
            denominator = basis.mul_add(basis, denominator);
        }
        if denominator == 0.0 {
            return Err(PolyError::DivisionByZero);
        }
        let mut p = Polynomial::zero(1);
        p.set_unchecked(&[degree], numerator / denominator);
        Ok(p)
    }

    /// General 1D path: Hankel normal matrix from power sums.
    fn fit_hankel(
        us: &[f64],
        ys: &[f64],
        min_degree: u32,
        max_degree: u32,
        symmetric: bool,
    ) -> Result<Polynomial> {
        let coeff_count = (max_degree - min_degree + 1) as usize;
        let two_min = 2 * min_degree as usize;
        let top = two_min + 2 * (coeff_count - 1);

        // S_k = sum over samples of u^k, one multiply per slot.
        let mut sums = vec![0.0f64; top + 1];
        for &u in us {
            let mut power = 1.0f64;
            for slot in &mut sums {
                *slot += power;
                power *= u;
            }
        }
        // Symmetric sampling makes every odd power sum an exact zero;
        // skipping the accumulated round-off also keeps the Hankel
        // skew-diagonals exactly where they belong.
        if symmetric {
            for slot in sums.iter_mut().skip(1).step_by(2) {
                *slot = 0.0;
            }
        }

        let mut hankel = vec![0.0f64; coeff_count * coeff_count];
        for i in 0..coeff_count {
            for j in 0..coeff_count {
                hankel[i * coeff_count + j] = sums[i + j + two_min];
            }
        }
        let normal = DenseMatrix::from_vec(hankel, coeff_count, coeff_count);

        let mut rhs = vec![0.0f64; coeff_count];
        for (&u, &y) in us.iter().zip(ys) {
            let mut power = u.powi(min_degree as i32);
            for slot in &mut rhs {
                *slot = y.mul_add(power, *slot);
                power *= u;
            }
        }

        let solution = normal.solve_spd(&rhs)?;
        let mut p = Polynomial::zero(1);
        for (i, &c) in solution.iter().enumerate() {
            p.set_unchecked(&[min_degree + i as u32], c);
        }
        Ok(p)
    }

    /// Fits a 2D polynomial to samples `points[i] -> values[i]`.
    ///
    /// The monomial set is controlled by `degrees`: either a total-degree
    /// band, or independent per-dimension degree bands. The design
    /// matrix is built explicitly and the normal equations are solved by
    /// Cholesky.
    ///
    /// # Errors
    ///
    /// [`PolyError::SingularMatrix`] when the samples cannot determine
    /// the requested coefficients, plus the usual validation errors.
    pub fn fit_2d(points: &[[f64; 2]], values: &[f64], degrees: &FitDegree) -> Result<Polynomial> {
        if points.is_empty() {
            return Err(PolyError::InvalidArgument("no sample points"));
        }
        if points.len() != values.len() {
            return Err(PolyError::DimensionMismatch {
                expected: points.len(),
                got: values.len(),
            });
        }

        let powers = monomial_powers_2d(degrees)?;
        let coeff_count = powers.len();
        if points.len() < coeff_count {
            return Err(PolyError::SingularMatrix(
                "fewer sample points than coefficients",
            ));
        }

        let rows: Vec<Vec<f64>> = points
            .iter()
            .map(|&[x, y]| {
                powers
                    .iter()
                    .map(|&(i, j)| x.powi(i as i32) * y.powi(j as i32))
                    .collect()
            })
            .collect();
        let design = DenseMatrix::from_rows(rows);

        let normal = design.normal_matrix();
        let rhs = design.tmv(values);
        let solution = normal.solve_spd(&rhs)?;

        let mut p = Polynomial::zero(2);
        for (&(i, j), &c) in powers.iter().zip(&solution) {
            p.set_unchecked(&[i, j], c);
        }
        Ok(p)
    }

    /// Dimension-dispatching fit over a sample matrix (one row per
    /// sample, one column per variable).
    ///
    /// `symmetric` is honoured by the 1D path only. Fitting in more than
    /// two dimensions is not generalised.
    ///
    /// # Errors
    ///
    /// See [`Polynomial::fit_1d`] and [`Polynomial::fit_2d`]; a sample
    /// dimension above 2 reports [`PolyError::Unsupported`].
    pub fn fit(
        points: &DenseMatrix<f64>,
        values: &[f64],
        degrees: &FitDegree,
        symmetric: bool,
    ) -> Result<Polynomial> {
        match points.num_cols() {
            1 => {
                let xs: Vec<f64> = (0..points.num_rows()).map(|r| points[(r, 0)]).collect();
                let (min, max) = match degrees {
                    FitDegree::Total { min, max } => (*min, *max),
                    FitDegree::PerDimension(bounds) => {
                        let &[(min, max)] = bounds.as_slice() else {
                            return Err(PolyError::DimensionMismatch {
                                expected: 1,
                                got: bounds.len(),
                            });
                        };
                        (min, max)
                    }
                };
                Self::fit_1d(&xs, values, min, max, symmetric)
            }
            2 => {
                let samples: Vec<[f64; 2]> = (0..points.num_rows())
                    .map(|r| [points[(r, 0)], points[(r, 1)]])
                    .collect();
                Self::fit_2d(&samples, values, degrees)
            }
            _ => Err(PolyError::Unsupported(
                "fitting in more than two dimensions",
            )),
        }
    }

    /// Mean squared residual of this polynomial over a sample set.
    ///
    /// # Errors
    ///
    /// Validation errors when the sample matrix does not match the
    /// polynomial's dimension or the value count.
    pub fn mse(&self, points: &DenseMatrix<f64>, values: &[f64]) -> Result<f64> {
        if points.num_cols() != self.dimension() {
            return Err(PolyError::IncompatibleDimensions {
                left: self.dimension(),
                right: points.num_cols(),
            });
        }
        if points.num_rows() != values.len() {
            return Err(PolyError::DimensionMismatch {
                expected: points.num_rows(),
                got: values.len(),
            });
        }
        if values.is_empty() {
            return Err(PolyError::InvalidArgument("no sample points"));
        }

        let mut sum = 0.0f64;
        for (row, &y) in values.iter().enumerate() {
            let err = self.eval(points.row(row))? - y;
            sum = err.mul_add(err, sum);
        }
        Ok(sum / values.len() as f64)
    }
}

/// Number of distinct abscissas, compared bit-exactly.
fn distinct_count(xs: &[f64]) -> usize {
    let mut seen = FxHashSet::default();
    for &x in xs {
        seen.insert(x.to_bits());
    }
    seen.len()
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Enumerates the fitted monomial power pairs for a 2D fit.
fn monomial_powers_2d(degrees: &FitDegree) -> Result<Vec<(u32, u32)>> {
    let powers = match degrees {
        FitDegree::Total { min, max } => {
            if min > max {
                return Err(PolyError::InvalidArgument("min degree exceeds max degree"));
            }
            let mut powers = Vec::new();
            for i in 0..=*max {
                for j in 0..=(*max - i) {
                    if i + j >= *min {
                        powers.push((i, j));
                    }
                }
            }
            powers
        }
        FitDegree::PerDimension(bounds) => {
            let &[(min_x, max_x), (min_y, max_y)] = bounds.as_slice() else {
                return Err(PolyError::DimensionMismatch {
                    expected: 2,
                    got: bounds.len(),
                });
            };
            if min_x > max_x || min_y > max_y {
                return Err(PolyError::InvalidArgument("min degree exceeds max degree"));
            }
            let mut powers = Vec::new();
            for i in min_x..=max_x {
                for j in min_y..=max_y {
                    powers.push((i, j));
                }
            }
            powers
        }
    };
    debug_assert!(!powers.is_empty());
    Ok(powers)
}
