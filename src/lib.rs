//! Singular value decomposition of dense real matrices.
//!
//! The decomposition $A = U\Sigma V^T$ is computed by Householder bidiagonalization
//! followed by implicitly shifted QR iterations. On top of the decomposition the crate
//! offers rank and condition estimates, low-rank compression, the pseudo-inverse and
//! regularised solvers for rank deficient least squares problems.

pub mod compute_svd;
pub mod helpers;
pub mod prelude;
pub mod random_matrix;
pub mod solve;
pub mod svd;
pub mod svd_compression;
pub mod types;

pub(crate) mod accumulate;
pub(crate) mod bidiag;
pub(crate) mod deflation;
pub(crate) mod givens;

pub enum CompressionType {
    /// Adaptive compression with a specified tolerance
    ADAPTIVE(f64),
    /// Rank based compression with specified rank
    RANK(usize),
}

pub use compute_svd::ComputeSVD;
pub use helpers::RelDiff;
pub use random_matrix::RandomMatrix;
pub use solve::{dsvd, pinv, tikhonov, tsvd, SolveSVD};
pub use svd::{dec, dec_with_params, SVDTraits, SvdParams, SVD};
pub use svd_compression::CompressSVD;
pub use types::{RealScalar, Result, RustySvdError};
