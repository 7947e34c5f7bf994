//! Error type, result alias and the scalar bound used throughout the crate.

use ndarray::NdFloat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RustySvdError {
    #[error("SVD did not converge: {remaining} singular values left after {iterations} QR sweeps")]
    NoConvergence { iterations: usize, remaining: usize },
    #[error("Could not compress to desired tolerance")]
    CompressionError,
    #[error("Incompatible dimensions: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Require 0 <= tol < 1, found {0}")]
    InvalidTolerance(f64),
}

pub type Result<T> = std::result::Result<T, RustySvdError>;

/// Real floating point scalars the decomposition is defined for.
///
/// This is implemented for `f32` and `f64`.
pub trait RealScalar: NdFloat {}

impl<A: NdFloat> RealScalar for A {}
