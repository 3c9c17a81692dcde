//! # Vela
//!
//! Polynomial algebra primitives for astronomical data-reduction
//! pipelines, written in Rust.
//!
//! ## Features
//!
//! - **Sparse Multivariate Polynomials**: recursive coefficient trees
//!   with exact per-monomial access and lazy growth
//! - **Numerically Careful Evaluation**: nested Horner with fused
//!   multiply-adds, cancellation-safe two-point differences
//! - **Calculus**: partial derivatives, binomial coordinate shifts,
//!   constant substitution
//! - **Root Finding**: accelerated Newton-Raphson with multiplicity
//! - **Least-Squares Fitting**: Hankel/Vandermonde normal equations
//!   solved by Cholesky
//!
//! ## Quick Start
//!
//! ```rust
//! use vela::prelude::*;
//!
//! let mut p = Polynomial::new(1).unwrap();
//! p.set_coefficient(&[0], -1.0).unwrap(); // p(x) = x - 1
//! p.set_coefficient(&[1], 1.0).unwrap();
//! assert_eq!(p.solve_1d(5.0, 1).unwrap(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use vela_linalg as linalg;
pub use vela_poly as poly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use vela_linalg::{DenseMatrix, LinAlgError};
    pub use vela_poly::{FitDegree, PolyError, Polynomial};
}
