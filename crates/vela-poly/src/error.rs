//! Error reporting for polynomial operations.
//!
//! Every public entry point validates its arguments first and reports the
//! most specific applicable error before touching any state, so a failed
//! call never leaves a polynomial in a partially-modified shape.

use thiserror::Error;

use vela_linalg::LinAlgError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PolyError>;

/// Errors reported by polynomial operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PolyError {
    /// A polynomial must have at least one variable.
    #[error("a polynomial must have at least one dimension")]
    ZeroDimension,

    /// A power or point vector had the wrong number of entries.
    #[error("expected {expected} entries, got {got}")]
    DimensionMismatch {
        /// Number of entries the operation needs.
        expected: usize,
        /// Number of entries actually supplied.
        got: usize,
    },

    /// A dimension index was out of range for this polynomial.
    #[error("dimension index {index} out of range for a {dimension}-dimensional polynomial")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The polynomial's dimension count.
        dimension: usize,
    },

    /// Two polynomials passed to a binary operation have different dimensions.
    #[error("operands have incompatible dimensions ({left} vs {right})")]
    IncompatibleDimensions {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// An argument violated a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A mode this implementation does not generalise to.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// A division by zero, or a root request on a root-free polynomial.
    #[error("division by zero")]
    DivisionByZero,

    /// A fit's normal equations cannot be solved.
    #[error("singular system: {0}")]
    SingularMatrix(&'static str),

    /// The root solver exhausted its iteration budget.
    #[error("no convergence after {iterations} iterations (best estimate {best})")]
    NoConvergence {
        /// Number of Newton-Raphson iterations performed.
        iterations: usize,
        /// The last iterate reached when the budget ran out.
        best: f64,
    },
}

impl From<LinAlgError> for PolyError {
    fn from(err: LinAlgError) -> Self {
        match err {
            LinAlgError::Singular => Self::SingularMatrix("normal equations are singular"),
            LinAlgError::NotSquare { .. } => Self::InvalidArgument("matrix is not square"),
        }
    }
}
