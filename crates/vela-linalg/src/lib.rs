//! # vela-linalg
//!
//! Dense linear algebra for the Vela pipeline primitives.
//!
//! This crate provides:
//! - Dense matrices in row-major order, generic over a floating-point
//!   element type
//! - Parallel normal-equations products via rayon
//! - A Cholesky solver for symmetric positive-definite systems
//!
//! The crate is intentionally small: the fitting routines in `vela-poly`
//! only ever build normal-equations matrices, so a Cholesky factorisation
//! is all the decomposition machinery they need. A matrix that is not
//! positive definite is reported as singular rather than solved anyway.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cholesky;
pub mod dense_matrix;

pub use cholesky::LinAlgError;
pub use dense_matrix::DenseMatrix;
